use packetlens::prelude::*;
use tracing::info;

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// What a proxy might see on the wire: a phase, a direction, the concrete
/// class name of the decoded packet and the id it arrived with.
const SAMPLES: &[(ProtocolPhase, Direction, &str, i32)] = &[
    (ProtocolPhase::Handshake, Direction::Inbound, "PacketHandshakingInSetProtocol", 0x00),
    (ProtocolPhase::Login, Direction::Outbound, "PacketLoginOutSuccess", 0x02),
    (ProtocolPhase::Play, Direction::Outbound, "PacketPlayOutSetSlot", 0x15),
    (ProtocolPhase::Play, Direction::Outbound, "SPacketSetSlot", 0x15),
    // Known class, renumbered id.
    (ProtocolPhase::Play, Direction::Inbound, "CPacketChatMessage", 0x07),
    // Never declared: becomes a dynamic type.
    (ProtocolPhase::Play, Direction::Outbound, "com.example.mod.SyncManaPacket", 0xC8),
];

fn describe(packet: &PacketType) -> String {
    let kind = match (packet.is_dynamic(), packet.is_deprecated()) {
        (true, _) => "dynamic",
        (false, true) => "deprecated",
        (false, false) => "declared",
    };
    format!(
        "{:<24} {:<9} {} {} {}",
        packet.name().unwrap_or("UNREGISTERED"),
        packet.phase(),
        packet.direction(),
        packet.id(),
        kind,
    )
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), PacketLensError> {
    packetlens::init_logging();

    let lens = PacketLens::builder()
        .on_id_mismatch(|event| {
            info!(
                class = event.class_name,
                expected = %event.expected(),
                observed = %event.observed,
                "packet id drifted"
            );
        })
        .on_dynamic_create(|packet| info!(class = packet.class_name(), "unknown packet class"))
        .build()?;

    let registry = lens.registry().clone();
    for &(phase, direction, class_name, id) in SAMPLES {
        let packet = registry.classify(phase, direction, class_name, PacketId(id));
        println!("{class_name:<70} -> {}", describe(&packet));
    }

    // Dynamic types get their name once the executor has registered them.
    let stats = lens.shutdown().await?;
    println!();
    for &(phase, direction, class_name, id) in SAMPLES {
        let packet = registry.classify(phase, direction, class_name, PacketId(id));
        if packet.is_dynamic() {
            println!("{class_name:<70} -> {}", describe(&packet));
        }
    }
    info!(tasks = stats.completed, "done");
    Ok(())
}
