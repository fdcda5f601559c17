use serde::{Deserialize, Serialize};

/// Number of posts requested per page. The remote API takes it as `_limit`.
pub const PAGE_SIZE: usize = 10;

/// A single post as returned by `/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Post {
    /// Short attribution line shown under the body.
    pub fn byline(&self) -> String {
        match self.user_id {
            Some(user) => format!("#{} by user {}", self.id, user),
            None => format!("#{}", self.id),
        }
    }
}

/// One batch of posts fetched in a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<Post>,
    /// Zero-based index of the page that follows this one.
    pub next_page_index: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_remote_post_shape() {
        let json = r#"{"userId": 1, "id": 7, "title": "hello", "body": "line one\nline two"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.user_id, Some(1));
        assert_eq!(post.title, "hello");
        assert!(post.body.contains("line two"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let post: Post = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(post.user_id, None);
        assert!(post.title.is_empty());
        assert!(post.body.is_empty());
    }

    #[test]
    fn byline_includes_user_when_known() {
        let post = Post {
            id: 12,
            user_id: Some(2),
            title: String::new(),
            body: String::new(),
        };
        assert_eq!(post.byline(), "#12 by user 2");

        let anonymous = Post {
            user_id: None,
            ..post
        };
        assert_eq!(anonymous.byline(), "#12");
    }

    #[test]
    fn empty_page_reports_empty() {
        let page = Page {
            items: vec![],
            next_page_index: 4,
        };
        assert!(page.is_empty());
    }
}
