pub mod app;

pub use app::{AppConfig, RecruitmentLocking};
