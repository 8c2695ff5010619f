//! `parley queue` — inspect and drain the deferred queue.

use super::open_engine;

pub async fn list(
    session: Option<&str>,
    all: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(session).await?;
    let items = if all {
        engine.queue().items().to_vec()
    } else {
        engine.queue().pending()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("  Queue is empty.");
        return Ok(());
    }

    for item in &items {
        println!(
            "  {}  [{:<9}]  {}  {:?}  ({})",
            item.id,
            item.status.to_string(),
            item.timestamp.format("%Y-%m-%d %H:%M:%S"),
            item.user_input,
            item.reason
        );
    }
    println!();
    println!("  {} item(s)", items.len());
    Ok(())
}

pub async fn complete(session: Option<&str>, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(session).await?;
    if engine.complete(id).await? {
        println!("  Completed {id}");
    } else {
        println!("  No queued item with id {id}");
    }
    Ok(())
}

pub async fn reprocess(session: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(session).await?;
    let report = engine.reprocess_pending().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for done in &report.completed {
            println!("  {}  {}", done.id, done.response);
        }
        for failed in &report.failed {
            eprintln!("  {}  still pending: {}", failed.id, failed.error);
        }
        println!();
        println!(
            "  {} completed, {} failed",
            report.completed.len(),
            report.failed.len()
        );
    }

    if !report.is_clean() {
        return Err(format!("{} item(s) could not be completed", report.failed.len()).into());
    }
    Ok(())
}
