pub mod fix_service;
pub mod github;
