use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDate};
use log::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::source::{MessageQuery, MessageRef, MessageSource, RawMessage};

/// Message source reading exported alert emails from a directory tree. Each
/// message is a .eml file: an RFC 822 style header block, a blank line, then
/// the body text. Retrieval order is the sorted file id order.
pub(crate) struct MaildirSource {
    root_dir: PathBuf,
}

impl MaildirSource {
    pub(crate) fn new(root_dir: &Path) -> MaildirSource {
        MaildirSource { root_dir: root_dir.to_path_buf() }
    }

    fn read_raw(&self, id: &str) -> anyhow::Result<String> {
        let path = self.root_dir.join(id);
        fs::read_to_string(&path)
            .with_context(|| format!("Unable to read message file {}", path.display()))
    }
}

impl MessageSource for MaildirSource {
    fn list_messages(&self, query: &MessageQuery) -> anyhow::Result<Vec<MessageRef>> {
        let files = scan_files(&self.root_dir)?;

        let mut refs = vec![];
        for f in files {
            let raw = self.read_raw(&f)?;
            let headers = parse_headers(&raw);

            let date = match headers.date.as_deref().map(header_date_naive) {
                Some(Ok(d)) => d,
                Some(Err(e)) => {
                    warn!("Skipping {}: unparseable Date header: {}", f, e);
                    continue;
                }
                None => {
                    warn!("Skipping {}: no Date header", f);
                    continue;
                }
            };

            let subject = headers.subject.unwrap_or_default();
            if query.matches(&subject, date) {
                refs.push(MessageRef { id: f });
            }
        }

        Ok(refs)
    }

    fn fetch(&self, message: &MessageRef) -> anyhow::Result<RawMessage> {
        let raw = self.read_raw(&message.id)?;
        let header_date = parse_headers(&raw)
            .date
            .with_context(|| format!("No Date header in {}", message.id))?;
        Ok(RawMessage { text: body_of(&raw), header_date })
    }
}

/// Scan a dir recursively and list all eligible mail files
fn scan_files(root_path: &Path) -> anyhow::Result<BTreeSet<String>> {
    info!("Scanning mail files in {}", root_path.display());

    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root_path).into_iter();
    for entry in walker.filter_entry(|e| !is_hidden(e)) {
        if let Ok(dir_entry) = entry {
            // Ignore symlinks
            if dir_entry.path_is_symlink() {
                continue;
            }

            let path = dir_entry.path();
            // Ignore directory
            if path.is_dir() {
                continue;
            }

            // file_id is the sub path from the mail root dir.
            // E.g. for root ~/mail the file ~/mail/hdfc/01.eml will have the
            // file id 'hdfc/01.eml'
            let file_id = path.strip_prefix(root_path)?.to_string_lossy().to_string();
            if file_id.ends_with(".eml") {
                files.insert(file_id);
            }
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name()
        .to_str()
        .map(|s| s.starts_with("."))
        .unwrap_or(false)
}

struct HeaderBlock {
    subject: Option<String>,
    date: Option<String>,
}

/// Minimal header-block parse. Only Subject and Date are of interest.
fn parse_headers(raw: &str) -> HeaderBlock {
    let mut headers = HeaderBlock { subject: None, date: None };
    for line in raw.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Subject:") {
            headers.subject = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Date:") {
            headers.date = Some(value.trim().to_string());
        }
    }
    headers
}

fn body_of(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    match normalized.split_once("\n\n") {
        Some((_headers, body)) => body.trim().to_string(),
        None => normalized.trim().to_string(),
    }
}

fn header_date_naive(header_date: &str) -> chrono::ParseResult<NaiveDate> {
    DateTime::parse_from_str(header_date, "%a, %d %b %Y %H:%M:%S %z").map(|d| d.date_naive())
}
