use pn7150::controller::DiscoveryProfile;
use pn7150::protocol::Command;
use pn7150::{DeactivationType, Interface, Mode, Protocol};

fn wire(cmd: Command) -> String {
    hex::encode(cmd.to_frame().encode().unwrap())
}

#[test]
fn core_commands() {
    assert_eq!(wire(Command::CoreReset { reset_type: 1 }), "20000101");
    assert_eq!(wire(Command::CoreInit), "200100");
}

#[test]
fn reader_writer_programming() {
    let profile = DiscoveryProfile::for_mode(Mode::ReaderWriter);
    assert_eq!(
        wire(Command::RfDiscoverMap {
            entries: profile.map
        }),
        "21001306010101020101030101040102060101800180"
    );
    assert_eq!(
        wire(Command::RfDiscover {
            techs: profile.techs
        }),
        "210309040001020101010601"
    );
}

#[test]
fn selection_and_deactivation() {
    assert_eq!(
        wire(Command::RfDiscoverSelect {
            discovery_id: 2,
            protocol: Protocol::IsoDep,
            interface: Interface::IsoDep,
        }),
        "210403020402"
    );
    assert_eq!(
        wire(Command::RfDeactivate {
            kind: DeactivationType::Discovery
        }),
        "21060103"
    );
    assert_eq!(
        wire(Command::RfT3tPolling {
            system_code: 0xFFFF,
            request_code: 1,
            time_slot: 0x0F,
        }),
        "210804ffff010f"
    );
    assert_eq!(wire(Command::IsoDepPresenceCheck), "2f1100");
}
