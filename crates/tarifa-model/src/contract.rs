//! Contract form values and output routing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number portability intent for a line or home selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Portability {
    pub requested: bool,
    pub number: String,
    pub donor: String,
}

impl Portability {
    pub fn new(requested: bool, number: impl Into<String>, donor: impl Into<String>) -> Self {
        Self {
            requested,
            number: number.into(),
            donor: donor.into(),
        }
    }

    /// A portability clause is only written when the agent ticked the box and
    /// filled in both the number and the donor carrier.
    pub fn is_complete(&self) -> bool {
        self.requested && !self.number.trim().is_empty() && !self.donor.trim().is_empty()
    }
}

/// Where the customer collects the SIM card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickupMode {
    #[default]
    Sucursal,
    Domicilio,
}

impl FromStr for PickupMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sucursal" => Ok(PickupMode::Sucursal),
            "domicilio" => Ok(PickupMode::Domicilio),
            _ => Err(ModelError::UnknownVariant {
                kind: "pickup mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Free-text fields typed by the agent. The core passes them through into
/// rendered text without parsing them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractForm {
    /// Contract holder.
    pub titular: String,
    pub address: String,
    pub branch: String,
    pub billing_cycle: String,
    pub date: String,
    pub pickup: PickupMode,
}

/// Document template a contract is merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Mobile contract (`MOVIL`, `ALL`, `CONDICION`, ... placeholders).
    Mobile,
    /// Home contract (`Hogar`, `PORTA`, `PORTA2`, ... placeholders).
    Home,
}

impl TemplateKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Mobile => "contrato_template.docx",
            TemplateKind::Home => "contrato_template2.docx",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
