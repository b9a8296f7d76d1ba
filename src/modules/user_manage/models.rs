use serde::{Deserialize, Serialize};

use crate::common::store::Fields;

/// Request body for creating a resident profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateUserManageDto(pub Fields);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateUserManageDto(pub Fields);

impl From<CreateUserManageDto> for Fields {
    fn from(dto: CreateUserManageDto) -> Self {
        dto.0
    }
}

impl From<UpdateUserManageDto> for Fields {
    fn from(dto: UpdateUserManageDto) -> Self {
        dto.0
    }
}
