use serde::Serialize;

use crate::extract::Extraction;

/// One extracted transaction row. Created once per message, never mutated,
/// kept in message retrieval order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Transaction {
    pub(crate) datetime: String,
    pub(crate) card: Option<String>,
    pub(crate) amount: Option<f32>,
    pub(crate) narration: Option<String>,
}

impl Transaction {
    /// The datetime comes from the message header, never from the body text.
    pub(crate) fn new(datetime: String, fields: Extraction) -> Transaction {
        Transaction {
            datetime,
            card: fields.card,
            amount: fields.amount,
            narration: fields.narration,
        }
    }
}
