use crate::model::NoticeSummary;

/// Closing note appended to every notice message.
pub const CLOSING_NOTE: &str =
    "※ 장부 정리부터 신고까지, 세무 업무는 언제든 편하게 맡겨 주세요.";

/// Format the copy-paste message sent to the client.
pub fn render_message(summary: &NoticeSummary) -> String {
    format!(
        "[{business}] 부가가치세 신고 결과 안내\n\
         \n\
         매출 누계: {sales}원\n\
         매입 누계: {purchase}원\n\
         차가감 납부(환급)세액: {refund}원\n\
         \n\
         {CLOSING_NOTE}\n",
        business = summary.business,
        sales = summary.sales,
        purchase = summary.purchase,
        refund = summary.refund,
    )
}
