mod audit_event;
mod company;
mod content;
mod job;
mod report;
mod user;

pub use audit_event::AuditEvent;
pub use company::{CompanyProfile, CompanyRating};
pub use content::ModeratedContent;
pub use job::JobPost;
pub use report::{Report, ReportStatus};
pub use user::{Role, User};
