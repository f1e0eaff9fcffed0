//! End-to-end tests: real listener on 127.0.0.1:0, requests over HTTP, scripted LLM.

mod common;
mod engage;
mod health;
