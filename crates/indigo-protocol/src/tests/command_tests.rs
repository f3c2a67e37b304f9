//! Tests for [`ApiCommand`] and [`Status`].

use rstest::rstest;

use crate::{ApiCommand, Status};

#[rstest]
#[case(0x1002, Some(ApiCommand::ConfigureAp))]
#[case(0x2001, Some(ApiCommand::ConfigureSta))]
#[case(0x200B, Some(ApiCommand::SetStaPowerSave))]
#[case(0x5005, Some(ApiCommand::CreateNewInterfaceBridgeNetwork))]
#[case(0x5009, None)]
#[case(0x0000, None)]
fn codes_map_onto_commands(#[case] code: u16, #[case] expected: Option<ApiCommand>) {
    assert_eq!(ApiCommand::from_code(code), expected);
}

#[test]
fn every_command_maps_back_to_itself() {
    for command in ApiCommand::ALL {
        assert_eq!(ApiCommand::from_code(command.code()), Some(*command));
    }
}

#[test]
fn command_codes_are_listed_in_order() {
    let codes: Vec<u16> = ApiCommand::ALL.iter().map(|command| command.code()).collect();
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(codes, sorted);
}

#[rstest]
#[case(0, Status::Ok)]
#[case(1, Status::NotOk)]
#[case(7, Status::NotOk)]
fn nonzero_status_bytes_are_failures(#[case] byte: u8, #[case] expected: Status) {
    assert_eq!(Status::from_byte(byte), expected);
}
