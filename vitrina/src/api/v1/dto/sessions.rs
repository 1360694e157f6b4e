//! Session request/response DTOs for the v1 API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ConversationTurn, Role, SessionMap};

/// One conversation turn on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TurnDto {
    /// `user` or `assistant`.
    pub role: String,
    pub text: String,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

impl From<ConversationTurn> for TurnDto {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            role: turn.role.to_string(),
            text: turn.text,
            timestamp: turn.timestamp,
        }
    }
}

impl TryFrom<TurnDto> for ConversationTurn {
    type Error = String;

    fn try_from(dto: TurnDto) -> Result<Self, Self::Error> {
        Ok(Self {
            role: dto.role.parse::<Role>()?,
            text: dto.text,
            timestamp: dto.timestamp,
        })
    }
}

/// Response body for `GET /v1/sessions/{userId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    /// Chat name → turns in submission order.
    pub sessions: BTreeMap<String, Vec<TurnDto>>,
}

impl SessionsResponse {
    pub fn from_map(map: SessionMap) -> Self {
        Self {
            sessions: map
                .into_iter()
                .map(|(name, turns)| (name, turns.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

/// Request body for `PUT /v1/sessions/{userId}` — wholesale replacement.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PutSessionsRequest {
    pub sessions: BTreeMap<String, Vec<TurnDto>>,
}

impl PutSessionsRequest {
    pub fn into_map(self) -> Result<SessionMap, String> {
        self.sessions
            .into_iter()
            .map(
                |(name, turns)| -> Result<(String, Vec<ConversationTurn>), String> {
                    let turns: Result<Vec<ConversationTurn>, String> =
                        turns.into_iter().map(TryInto::try_into).collect();
                    Ok((name, turns?))
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_dto_roundtrip() {
        let turn = ConversationTurn::user("blue shoes");
        let dto: TurnDto = turn.clone().into();
        assert_eq!(dto.role, "user");

        let restored: ConversationTurn = dto.try_into().unwrap();
        assert_eq!(restored, turn);
    }

    #[test]
    fn test_put_sessions_rejects_unknown_role() {
        let json = r#"{
            "sessions": {
                "42_Chat_1": [
                    {"role": "system", "text": "x", "timestamp": "2025-01-01T00:00:00Z"}
                ]
            }
        }"#;
        let req: PutSessionsRequest = serde_json::from_str(json).expect("deserialize");
        assert!(req.into_map().is_err());
    }
}
