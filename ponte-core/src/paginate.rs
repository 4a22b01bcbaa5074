use std::time::Duration;

use crate::error::PonteError;

/// Paging parameters shared by both paginator shapes.
#[derive(Debug, Clone, Copy)]
pub struct PageConfig {
    /// Items requested per page.
    pub page_size: u32,
    /// Fixed pause between consecutive page fetches.
    pub delay: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            delay: Duration::from_millis(100),
        }
    }
}

/// One page from a cursor-driven vendor endpoint.
#[derive(Debug, Clone)]
pub struct Page<T, C> {
    /// Items on this page, in vendor order.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` means this page was the last.
    pub next_cursor: Option<C>,
}

/// Drives an offset/limit endpoint to exhaustion.
///
/// `fetch_page(offset, limit)` is called until it returns fewer items than
/// `cfg.page_size`; pages are concatenated in vendor order with no
/// deduplication. A fixed `cfg.delay` pause separates fetches, and the
/// `on_delay` hook fires before each pause.
pub async fn paginate<T, F, Fut, D>(
    cfg: &PageConfig,
    mut on_delay: D,
    mut fetch_page: F,
) -> Result<Vec<T>, PonteError>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, PonteError>>,
    D: FnMut(),
{
    let mut all = Vec::new();
    let mut offset = 0u32;
    loop {
        let page = fetch_page(offset, cfg.page_size).await?;
        let fetched = page.len() as u32;
        all.extend(page);
        if fetched < cfg.page_size {
            return Ok(all);
        }
        offset += fetched;
        tracing::debug!(
            offset,
            delay_ms = cfg.delay.as_millis() as u64,
            "throttling between pages"
        );
        on_delay();
        tokio::time::sleep(cfg.delay).await;
    }
}

/// Drives a vendor-native cursor endpoint to exhaustion.
///
/// `fetch_page(cursor)` starts with `None` and is re-invoked with each
/// returned cursor until a page carries no `next_cursor`. Pause and hook
/// behavior match [`paginate`].
pub async fn paginate_cursor<T, C, F, Fut, D>(
    cfg: &PageConfig,
    mut on_delay: D,
    mut fetch_page: F,
) -> Result<Vec<T>, PonteError>
where
    F: FnMut(Option<C>) -> Fut,
    Fut: Future<Output = Result<Page<T, C>, PonteError>>,
    D: FnMut(),
{
    let mut all = Vec::new();
    let mut cursor = None;
    loop {
        let page = fetch_page(cursor).await?;
        all.extend(page.items);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Ok(all),
        }
        tracing::debug!(
            fetched = all.len(),
            delay_ms = cfg.delay.as_millis() as u64,
            "throttling between pages"
        );
        on_delay();
        tokio::time::sleep(cfg.delay).await;
    }
}
