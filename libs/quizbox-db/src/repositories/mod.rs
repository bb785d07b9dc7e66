pub mod ad_repo;
pub mod quiz_repo;
