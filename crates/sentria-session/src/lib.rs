// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed session tokens binding a chat session to the user it was issued
//! for. Tokens are HMAC-SHA256 over a JSON claims payload; there is no
//! server-side session store, the token is the session.

pub mod token;

pub use token::{Claims, SessionSigner};
