//! Queries issued against the Churros API

use super::client::QueryClient;
use super::payload::MembershipsData;
use super::transport::QueryTransport;
use crate::Result;
use serde_json::json;
use tracing::info;

/// Groups of the given types, each board member, and every membership of
/// those board members across the directory
pub const MEMBERSHIPS_QUERY: &str = r#"
    query Memberships($types: [GroupType!]!) {
        groups(types: $types) {
            name
            color
            type
            boardMembers {
                member {
                    groups {
                        president, secretary, treasurer, vicePresident, title
                        member { uid, yearTier }
                        group {
                            type
                            name
                        }
                    }
                }
            }
        }
    }
"#;

/// Fetch and validate the memberships of every group of `group_types`
pub async fn fetch_memberships<T: QueryTransport>(
    client: &mut QueryClient<T>,
    group_types: &[String],
) -> Result<MembershipsData> {
    let response = client
        .execute(MEMBERSHIPS_QUERY, json!({ "types": group_types }))
        .await?;
    let data = MembershipsData::from_response(&response)?;

    info!(groups = data.groups.len(), "Memberships fetched");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::name_query;

    #[test]
    fn test_memberships_query_follows_naming_convention() {
        let named = name_query(MEMBERSHIPS_QUERY, "ChurrosGraphs").unwrap();
        assert_eq!(named.operation_name, "ChurrosGraphs_Memberships");
    }

    #[test]
    fn test_memberships_query_requests_every_payload_field() {
        for field in [
            "boardMembers",
            "vicePresident",
            "yearTier",
            "uid",
            "color",
            "type",
            "title",
        ] {
            assert!(MEMBERSHIPS_QUERY.contains(field), "missing {}", field);
        }
    }
}
