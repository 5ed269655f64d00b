mod common;
mod renewal_failures;
