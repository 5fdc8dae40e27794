use crate::models::TransactionModel;

resource! {
    /// A unified, read-only view over invoices, credit memos and payments.
    TransactionsClient => "/api/v1/Transactions", TransactionModel {
        query: query_transactions,
    }
}
