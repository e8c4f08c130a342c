pub mod checkins;
pub mod export;
pub mod facilities;
pub mod guests;
pub mod summaries;
pub mod templates;
pub mod users;
pub mod validation;

pub use checkins::CheckinService;
pub use export::ExportService;
pub use facilities::FacilityService;
pub use guests::GuestService;
pub use summaries::SummaryService;
pub use templates::TemplateService;
pub use users::UserService;
