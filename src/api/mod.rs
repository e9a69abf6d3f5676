//! Churros API access
//!
//! Named GraphQL queries over a pluggable transport, answered from the
//! response cache when possible, and typed payloads validated at the boundary.
//!
//! # Flow
//!
//! 1. **Name**: the query is rewritten to `query <namespace>_<Name>`
//! 2. **Cache**: its fingerprint is looked up in the ResponseCache
//! 3. **Send** (miss only): the transport posts it; the response is checked and stored
//! 4. **Type**: the payload is deserialized into `MembershipsData`

pub mod client;
pub mod payload;
pub mod queries;
pub mod transport;

pub use client::{is_graphql_name, name_query, ClientStats, NamedQuery, QueryClient};
pub use payload::MembershipsData;
pub use queries::{fetch_memberships, MEMBERSHIPS_QUERY};
pub use transport::{GraphQLRequest, HttpTransport, QueryTransport, TOKEN_ENV_VAR};
