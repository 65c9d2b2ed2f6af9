//! Page-at-a-time listing state shared by the order and transaction views.
//!
//! Page 1 replaces the items, later pages append. A page that comes back
//! exactly `limit` long means there may be more.

use std::future::Future;

use shared::{ApiResponse, PageQuery};

use crate::core::error::{AppError, Result};

/// Clears the loading flag when the fetch finishes or is cancelled.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn hold(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    items: Vec<T>,
    page: u32,
    limit: u32,
    has_more: bool,
    loading: bool,
}

impl<T> Paginated<T> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            limit: limit.max(1),
            has_more: true,
            loading: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last page loaded, 0 before the first load.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn apply(&mut self, page: u32, items: Vec<T>) {
        self.has_more = items.len() == self.limit as usize;
        if page <= 1 {
            self.items = items;
        } else {
            self.items.extend(items);
        }
        self.page = page;
    }

    async fn fetch<F, Fut>(&mut self, page: u32, fetch: &F) -> Result<Vec<T>>
    where
        F: Fn(PageQuery) -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>>,
    {
        if self.loading {
            return Err(AppError::Busy("Page load"));
        }
        let limit = self.limit;
        let _loading = LoadingGuard::hold(&mut self.loading);
        fetch(PageQuery { page, limit })
            .await
            .into_result()
            .map_err(AppError::Api)
    }

    /// Load page 1, replacing whatever was shown.
    pub async fn load_first<F, Fut>(&mut self, fetch: F) -> Result<()>
    where
        F: Fn(PageQuery) -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>>,
    {
        let items = self.fetch(1, &fetch).await?;
        self.apply(1, items);
        Ok(())
    }

    /// Append the next page. A no-op once the last page has been seen.
    pub async fn load_more<F, Fut>(&mut self, fetch: F) -> Result<()>
    where
        F: Fn(PageQuery) -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>>,
    {
        if !self.has_more {
            return Ok(());
        }
        let next = self.page + 1;
        let items = self.fetch(next, &fetch).await?;
        self.apply(next, items);
        Ok(())
    }

    /// Refetch pages `1..=page` and swap them in together. On failure the
    /// current items stay untouched.
    pub async fn reload<F, Fut>(&mut self, fetch: F) -> Result<()>
    where
        F: Fn(PageQuery) -> Fut,
        Fut: Future<Output = ApiResponse<Vec<T>>>,
    {
        let last = self.page.max(1);
        let mut fresh = Vec::new();
        let mut has_more = true;

        for page in 1..=last {
            let items = self.fetch(page, &fetch).await?;
            has_more = items.len() == self.limit as usize;
            fresh.extend(items);
            if !has_more {
                break;
            }
        }

        self.items = fresh;
        self.has_more = has_more;
        self.page = last;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(sizes: &'static [usize]) -> impl Fn(PageQuery) -> std::future::Ready<ApiResponse<Vec<u32>>> {
        move |query| {
            let size = sizes.get(query.page as usize - 1).copied().unwrap_or(0);
            let start = (query.page - 1) * query.limit;
            std::future::ready(ApiResponse::ok((start..start + size as u32).collect()))
        }
    }

    #[tokio::test]
    async fn test_full_page_means_more() {
        let mut list = Paginated::new(3);
        list.load_first(pages(&[3, 1])).await.unwrap();
        assert!(list.has_more());
        assert_eq!(list.items(), &[0, 1, 2]);

        list.load_more(pages(&[3, 1])).await.unwrap();
        assert!(!list.has_more());
        assert_eq!(list.items(), &[0, 1, 2, 3]);
        assert_eq!(list.page(), 2);

        // Nothing left: no fetch, no change.
        list.load_more(|_| async { ApiResponse::<Vec<u32>>::failure("should not fetch") })
            .await
            .unwrap();
        assert_eq!(list.items().len(), 4);
    }

    #[tokio::test]
    async fn test_short_first_page() {
        let mut list = Paginated::new(10);
        list.load_first(pages(&[4])).await.unwrap();
        assert!(!list.has_more());
        assert_eq!(list.items().len(), 4);
    }

    #[tokio::test]
    async fn test_reload_refetches_loaded_pages() {
        let mut list = Paginated::new(2);
        list.load_first(pages(&[2, 2, 1])).await.unwrap();
        list.load_more(pages(&[2, 2, 1])).await.unwrap();
        assert_eq!(list.items(), &[0, 1, 2, 3]);

        list.reload(pages(&[2, 2, 1])).await.unwrap();
        assert_eq!(list.items(), &[0, 1, 2, 3]);
        assert_eq!(list.page(), 2);
        assert!(list.has_more());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_items() {
        let mut list = Paginated::new(2);
        list.load_first(pages(&[2])).await.unwrap();

        let err = list
            .reload(|_| std::future::ready(ApiResponse::<Vec<u32>>::failure("boom")))
            .await
            .unwrap_err();

        assert_eq!(err, AppError::Api("boom".into()));
        assert_eq!(list.items(), &[0, 1]);
        assert!(!list.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_does_not_stay_busy() {
        let mut list = Paginated::new(2);

        let stalled = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            list.load_first(|_| std::future::pending::<ApiResponse<Vec<u32>>>()),
        )
        .await;
        assert!(stalled.is_err());
        assert!(!list.is_loading());

        list.load_first(pages(&[2])).await.unwrap();
        assert_eq!(list.items(), &[0, 1]);
    }
}
