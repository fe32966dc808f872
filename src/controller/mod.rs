use comfy_table::{Table, TableComponent};
use log::{info, warn};

use crate::extract;
use crate::sink::RecordSink;
use crate::source::{MessageQuery, MessageSource};
use crate::transaction::Transaction;
use crate::util;

/// Fetch matching alert messages, extract transaction fields and hand the
/// rows to the sink. Returns the number of messages processed.
pub(crate) fn run(
    source: &dyn MessageSource,
    sink: &mut dyn RecordSink,
    query: &MessageQuery,
    dry_run: bool,
) -> anyhow::Result<usize> {
    info!("Listing messages matching {}", query.render());
    let refs = source.list_messages(query)?;
    info!("{} messages matched", refs.len());

    let mut transactions: Vec<Transaction> = vec![];
    for r in &refs {
        let message = source.fetch(r)?;
        let datetime = match util::format_datetime(&message.header_date) {
            Ok(datetime) => datetime,
            Err(e) => {
                warn!("Skipping {}: {}", r.id, e);
                continue;
            }
        };
        transactions.push(Transaction::new(datetime, extract::extract(&message.text)));
    }

    if dry_run {
        print_transactions(&transactions);
        info!("This is a dry-run. Transactions are not appended");
        return Ok(transactions.len());
    }

    let appended = sink.append_rows(&transactions)?;
    info!("{} new rows appended to the sheet", appended);

    Ok(transactions.len())
}

fn print_transactions(transactions: &[Transaction]) {
    let mut table = Table::new();
    table.set_header(vec!["Datetime", "Card", "Amount", "Narration"]);
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    for t in transactions {
        table.add_row(vec![
            t.datetime.clone(),
            t.card.clone().unwrap_or_default(),
            t.amount.map(|a| format!("{:.2}", a)).unwrap_or_default(),
            t.narration.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
}
