//! HTTP surface of the shortener.
//!
//! Public routes are `POST /shorten`, `GET /{code}` and `GET /health`.
//! `GET /stats/{code}` sits behind a per-IP rate limit. Error bodies come
//! from [`crate::error::AppError`].

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
