mod animator;
mod config;
mod properties;
