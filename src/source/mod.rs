pub(crate) mod maildir;

use chrono::NaiveDate;

/// Query sent to the message source: any of the subject keywords, within the
/// date range. The range semantics are owned by the source; here 'after' is
/// inclusive and 'before' is exclusive.
#[derive(Debug, Clone)]
pub(crate) struct MessageQuery {
    pub(crate) subject_keywords: Vec<String>,
    pub(crate) after: NaiveDate,
    pub(crate) before: NaiveDate,
}

impl MessageQuery {
    pub(crate) fn matches(&self, subject: &str, date: NaiveDate) -> bool {
        let subject_matched = self.subject_keywords.iter().any(|k| subject.contains(k.as_str()));
        subject_matched && date >= self.after && date < self.before
    }

    /// Mail-provider style rendering of the query, used for logging.
    pub(crate) fn render(&self) -> String {
        let subjects = self
            .subject_keywords
            .iter()
            .map(|k| format!("subject:({})", k))
            .collect::<Vec<String>>()
            .join(" OR ");
        format!(
            "({}) after:{} before:{}",
            subjects,
            self.after.format("%Y/%m/%d"),
            self.before.format("%Y/%m/%d")
        )
    }
}

/// Opaque handle to one message held by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MessageRef {
    pub(crate) id: String,
}

pub(crate) struct RawMessage {
    /// Free-text body the extractor runs over.
    pub(crate) text: String,
    /// Timestamp taken from the message header, unparsed.
    pub(crate) header_date: String,
}

pub(crate) trait MessageSource {
    fn list_messages(&self, query: &MessageQuery) -> anyhow::Result<Vec<MessageRef>>;
    fn fetch(&self, message: &MessageRef) -> anyhow::Result<RawMessage>;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::source::MessageQuery;

    fn october() -> MessageQuery {
        MessageQuery {
            subject_keywords: vec!["Transaction alert".to_string(), "Transaction Alert".to_string()],
            after: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            before: NaiveDate::from_ymd_opt(2024, 10, 31).unwrap(),
        }
    }

    #[test]
    fn test_subject_keyword_or() {
        let query = october();
        let date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();
        assert!(query.matches("Transaction Alert from HDFC Bank", date));
        assert!(query.matches("SBI Card Transaction alert", date));
        assert!(!query.matches("Your October statement", date));
    }

    #[test]
    fn test_date_range_boundaries() {
        let query = october();
        let subject = "Transaction alert";
        assert!(query.matches(subject, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()));
        assert!(query.matches(subject, NaiveDate::from_ymd_opt(2024, 10, 30).unwrap()));
        assert!(!query.matches(subject, NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()));
        assert!(!query.matches(subject, NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()));
    }

    #[test]
    fn test_render() {
        let query = october();
        assert_eq!(
            query.render(),
            "(subject:(Transaction alert) OR subject:(Transaction Alert)) after:2024/10/01 before:2024/10/31"
        );
    }
}
