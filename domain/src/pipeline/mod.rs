//! Pipeline domain
//!
//! Entities and value objects that flow through a single pipeline run.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`verdict`] | Classification gate verdict |
//! | [`stage`] | Stage identifiers used for progress and error reporting |
//! | [`records`] | Filtered questions and question/context records |
//! | [`normalizer`] | Reconciliation of loosely-typed model output |
//! | [`filtered`] | The structured-or-degraded filtered question set |
//! | [`result`] | The terminal pipeline result |

pub mod filtered;
pub mod normalizer;
pub mod records;
pub mod result;
pub mod stage;
pub mod verdict;
