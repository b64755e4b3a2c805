//! m2mgen Core Library
//!
//! This library generates oneM2M device clients (Arduino Nano 33 IoT, ESP32
//! and ESP8266 sketches, and a Python script) from a validated device
//! configuration, and performs live test requests against a CSE.

pub mod builders;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod params;
pub mod passthrough;
pub mod platform;
pub mod templates;
pub mod validate;

pub use crate::{
    config::{GenerationConfig, Operation, Protocol, RawConfig},
    error::{Error, Result},
    generate::{generate, GeneratedCode},
    params::Parameter,
    passthrough::{PassthroughClient, PassthroughError, PassthroughOptions, PassthroughResponse},
    platform::Platform,
    templates::TemplateManager,
    validate::{validate, ValidationError},
};
