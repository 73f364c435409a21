use jangbu_core::config::LayoutConfig;
use jangbu_core::error::JangbuError;

use crate::output;

pub fn run() -> Result<(), JangbuError> {
    output::json::print(&LayoutConfig::default())
}
