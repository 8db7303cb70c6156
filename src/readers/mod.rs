//! This module declares all readers.
//! A reader is used to fetch data over the network. The only reader
//! needed here is HTTP(S), the feeds are all plain HTTPS documents.

pub mod http;
