//! Transport Adapter - reqwest 实现的任务传输

mod http_job_transport;

pub use http_job_transport::*;
