//! Typed records for the document collections and their response DTOs.
//!
//! Records mirror the stored BSON shape (camelCase fields, `ObjectId`
//! references). Cross-collection references are weak: the referenced
//! document may have been deleted, so every reference is `Option` or
//! resolved defensively. API responses never expose raw `ObjectId`s; the
//! `*View` DTOs carry hex strings instead.

pub mod media;
pub mod notice;
pub mod payment;
pub mod report_card;
pub mod school;
pub mod sclass;
pub mod secretary;
pub mod student;
pub mod subject;
pub mod teacher;
