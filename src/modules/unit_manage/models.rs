use serde::{Deserialize, Serialize};

use crate::common::store::Fields;

/// Request body for creating a unit. Any JSON object is accepted as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateUnitManageDto(pub Fields);

/// Partial update for a unit; present keys replace stored ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateUnitManageDto(pub Fields);

impl From<CreateUnitManageDto> for Fields {
    fn from(dto: CreateUnitManageDto) -> Self {
        dto.0
    }
}

impl From<UpdateUnitManageDto> for Fields {
    fn from(dto: UpdateUnitManageDto) -> Self {
        dto.0
    }
}
