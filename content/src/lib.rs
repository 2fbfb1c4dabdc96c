//! Data model and statically authored curriculum for the dojo.
//!
//! Everything in this crate is pure data: academies, chapters, and the
//! playground scenarios they embed. Nothing here performs I/O and nothing is
//! mutated after module load; the only mutable runtime state in the system
//! (the enabled-component set of a playground session) lives in `dojo-core`.

mod academy;
mod curriculum;
mod model;
pub mod validate;

pub use academy::Academy;
pub use academy::AcademyId;
pub use academy::Chapter;
pub use academy::ChapterId;
pub use academy::Section;
pub use curriculum::academies;
pub use curriculum::academy;
pub use model::ComponentId;
pub use model::ContextComponent;
pub use model::PlaygroundResponse;
pub use model::PlaygroundScenario;
pub use model::Principle;
pub use model::ScenarioId;
pub use model::Tint;
