//! # TeamSwipe
//!
//! `teamswipe` is a small web application for finding teammates. It serves a
//! handful of content pages (home, browse, create, contact, notifications)
//! and an authentication flow: registration, login, a session-gated profile
//! page, and logout.
//!
//! ## Accounts & Sessions
//!
//! - **Email Normalization:** Emails are trimmed and lowercased before any
//!   lookup or insert, so `"Foo@Bar.com "` and `"foo@bar.com"` name the same
//!   account.
//! - **Credential Storage:** Passwords are stored as bcrypt hashes with a
//!   per-record salt embedded in the hash output. Raw passwords never touch
//!   the database.
//! - **Uniqueness:** The `users` table enforces email uniqueness through its
//!   primary key; a duplicate registration surfaces as a unique violation
//!   rather than a second row, even under concurrent requests.
//! - **Enumeration Resistance:** Login returns the same `401` response for an
//!   unknown email and a wrong password.
//!
//! Sessions are server-side (`tower-sessions`), keyed by a signed client
//! cookie, and hold a single field: the authenticated user's email.

pub mod cli;
pub mod teamswipe;
