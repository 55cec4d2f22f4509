// Copyright (C) 2025 The AElf Contract View Project.
//
// interface.rs file belongs to the aelf-contract-view project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire models for chain status and published contract interfaces.

use serde::{Deserialize, Serialize};

/// Status of the chain behind an endpoint, as reported by
/// `GET /api/blockChain/chainStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChainStatus {
    pub chain_id: String,
    /// Address of the zero (genesis) contract used to resolve other
    /// contracts by canonical name.
    pub genesis_contract_address: String,
    pub best_chain_height: u64,
    pub best_chain_hash: String,
}

/// The published interface of a deployed contract: every callable method with
/// its parameter shapes and declared mutability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContractInterface {
    pub methods: Vec<InterfaceMethod>,
}

/// One method of a contract interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterfaceMethod {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<InterfaceParameter>,

    /// Declared mutability. `Some(true)` marks a side-effect-free view
    /// method; `None` means the node did not declare it either way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_view: Option<bool>,
}

/// A named, typed method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterfaceParameter {
    pub name: String,

    #[serde(rename = "Type")]
    pub type_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_status_decodes_pascal_case() {
        let json = r#"{
            "ChainId": "AELF",
            "GenesisContractAddress": "2gaQh4uxg6Tzvi1Fx3...",
            "BestChainHeight": 12345,
            "BestChainHash": "0f7c6a8e"
        }"#;
        let status: ChainStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.chain_id, "AELF");
        assert_eq!(status.best_chain_height, 12345);
    }

    #[test]
    fn interface_tolerates_missing_view_flag_and_parameters() {
        let json = r#"{
            "Methods": [
                { "Name": "GetBalance",
                  "Parameters": [ { "Name": "owner", "Type": "address" } ],
                  "IsView": true },
                { "Name": "Initialize" }
            ]
        }"#;
        let interface: ContractInterface = serde_json::from_str(json).unwrap();
        assert_eq!(interface.methods.len(), 2);
        assert_eq!(interface.methods[0].is_view, Some(true));
        assert_eq!(interface.methods[1].is_view, None);
        assert!(interface.methods[1].parameters.is_empty());
    }
}
