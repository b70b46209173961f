use std::num::NonZeroUsize;
use std::ops::Range;

/// One index page of the paginated post list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Paginator {
    /// 1-based
    pub index: usize,
    pub total_indexes: usize,
    pub total_items: usize,
    /// Positions of this page's items in the sorted item list.
    pub items: Range<usize>,
    pub index_permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_index_permalink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_index_permalink: Option<String>,
    pub first_index_permalink: String,
    pub last_index_permalink: String,
}

impl Paginator {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split `total_items` into pages of `per_page`.
///
/// There is always at least one page so the site index exists even without posts.
pub fn paginate(total_items: usize, per_page: NonZeroUsize, paginate_path: &str) -> Vec<Paginator> {
    let per_page = per_page.get();
    let total_indexes = total_items.div_ceil(per_page).max(1);
    let first_index_permalink = index_permalink(1, paginate_path);
    let last_index_permalink = index_permalink(total_indexes, paginate_path);

    (1..=total_indexes)
        .map(|index| {
            let start = (index - 1) * per_page;
            let end = (start + per_page).min(total_items);
            let previous_index = (index > 1).then(|| index - 1);
            let next_index = (index < total_indexes).then(|| index + 1);
            Paginator {
                index,
                total_indexes,
                total_items,
                items: start.min(end)..end,
                index_permalink: index_permalink(index, paginate_path),
                previous_index,
                previous_index_permalink: previous_index
                    .map(|i| index_permalink(i, paginate_path)),
                next_index,
                next_index_permalink: next_index.map(|i| index_permalink(i, paginate_path)),
                first_index_permalink: first_index_permalink.clone(),
                last_index_permalink: last_index_permalink.clone(),
            }
        })
        .collect()
}

/// URL of the `index`th page; the first page is the site index.
pub fn index_permalink(index: usize, paginate_path: &str) -> String {
    if index <= 1 {
        return "/".to_owned();
    }
    let num = index.to_string();
    let mut vars = std::collections::BTreeMap::new();
    vars.insert("num", num);
    crate::explode_permalink(paginate_path, &vars)
}
