use serde::{Deserialize, Serialize};

pub mod ads;
pub mod quiz;

/// Placement keys the front end renders ad slots for.
pub mod slots {
    pub const SIDEBAR: &str = "sidebar";
    pub const QUIZ_MAIN: &str = "quiz-main";
    pub const HOME_FEED: &str = "YA_QHOME_FEED_001";

    pub const ALL: [&str; 3] = [SIDEBAR, QUIZ_MAIN, HOME_FEED];
}

pub mod api {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct HealthResponse {
        pub status: String,
        pub database: String,
        pub version: String,
    }

    impl HealthResponse {
        pub fn is_ok(&self) -> bool {
            self.status == "ok"
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ApiErrorBody {
        pub error: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ListResponse<T> {
        pub items: Vec<T>,
        pub count: usize,
    }

    impl<T> From<Vec<T>> for ListResponse<T> {
        fn from(items: Vec<T>) -> Self {
            let count = items.len();
            Self { items, count }
        }
    }
}
