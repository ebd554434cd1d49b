use serde::Serialize;

/// Current page of the result list; `page_index` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 1,
            page_size,
        }
    }

    pub fn reset(&mut self) {
        self.page_index = 1;
    }
}

/// Slice `[(page_index - 1) * page_size, page_index * page_size)` of the list
///
/// Does not clamp: a page past the end yields an empty slice. Callers clamp
/// with [`clamp_page_index`] first when they want the last page instead.
pub fn paginate<T>(list: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_sub(1).saturating_mul(page_size);
    if page_index == 0 || start >= list.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(list.len());
    &list[start..end]
}

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Bring a page index into `1..=total_pages`
pub fn clamp_page_index(page_index: usize, len: usize, page_size: usize) -> usize {
    page_index.clamp(1, total_pages(len, page_size))
}
