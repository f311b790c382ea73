pub mod clinical;
pub mod records;
pub mod report;
pub mod route;
pub mod session;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::{ListArgs, WindowArgs};
use hms_client::api::query::StatsQuery;

fn read_body(file: &Option<String>) -> Result<Value> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Invalid JSON")
}

/// `key=value` filters plus `--page` / `--page-size`, as sent on the query
/// string.
fn list_query(args: &ListArgs) -> Result<BTreeMap<String, String>> {
    let mut query = BTreeMap::new();
    for pair in &args.params {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid filter \"{pair}\". Expected key=value"))?;
        if key.is_empty() {
            anyhow::bail!("Invalid filter \"{pair}\": empty key");
        }
        query.insert(key.to_string(), value.to_string());
    }
    if let Some(page) = args.page {
        query.insert("page".to_string(), page.to_string());
    }
    if let Some(size) = args.page_size {
        query.insert("pageSize".to_string(), size.to_string());
    }
    Ok(query)
}

fn stats_query(window: &WindowArgs) -> StatsQuery {
    StatsQuery {
        start_date: window.start.clone(),
        end_date: window.end.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_merges_filters_and_paging() {
        let args = ListArgs {
            params: vec!["surname=张".into(), "deptId=3".into()],
            page: Some(2),
            page_size: Some(20),
        };
        let q = list_query(&args).unwrap();
        assert_eq!(q.get("surname").map(String::as_str), Some("张"));
        assert_eq!(q.get("deptId").map(String::as_str), Some("3"));
        assert_eq!(q.get("page").map(String::as_str), Some("2"));
        assert_eq!(q.get("pageSize").map(String::as_str), Some("20"));
    }

    #[test]
    fn list_query_rejects_malformed_pairs() {
        for bad in ["surname", "=x"] {
            let args = ListArgs {
                params: vec![bad.into()],
                page: None,
                page_size: None,
            };
            assert!(list_query(&args).is_err(), "{bad}");
        }
    }
}
