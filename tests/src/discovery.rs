mod api;
mod http_sinks;
mod integration;
mod stubs;
