use blog_core::domain::ArticleFilter;
use blog_shared::Pagination;
use serde::{Deserialize, Deserializer};

/// `?page=&pageSize=&category=&tag=&search=` on the public article index.
///
/// Page numbers that do not parse are treated as absent, so `?page=abc`
/// lists the first page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListQuery {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<u32>,
    #[serde(default, alias = "limit", deserialize_with = "lenient_number")]
    pub page_size: Option<u32>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl ArticleListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }

    pub fn filter(&self) -> ArticleFilter {
        ArticleFilter::new(self.category.clone(), self.tag.clone(), self.search.clone())
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
