//! # IO Module
//!
//! Provides the interface layer between clients and the domain logic.
//!
//! This module serves as the adapter layer that translates HTTP requests into
//! domain operations and formats domain responses for client consumption. It
//! handles the communication protocol (REST API), serialization and
//! deserialization, and maintains the boundary between transport concerns and
//! business logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Exposing REST API endpoints for client consumption
//! - **Authentication**: Resolving bearer tokens to users before any domain call
//! - **Request/Response Handling**: Processing HTTP requests and formatting responses
//! - **Data Serialization**: Converting between JSON and domain objects
//! - **Error Translation**: Converting domain errors to appropriate HTTP status codes
//! - **CORS Management**: Handling cross-origin requests for web frontends
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum for async HTTP handling
//! - **Serialization**: Serde for JSON serialization/deserialization
//! - **State Management**: Axum extractors for dependency injection
//! - **Error Handling**: Structured error bodies with appropriate HTTP codes

pub mod rest;

pub use rest::*;
