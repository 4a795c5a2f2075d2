//! Fuzz target: `CloudRouter::route`
//!
//! Splits the input into a topic and a payload and routes it.  Routing
//! must never panic, and every remote-call reply must be consistent with
//! the command it produced.
//!
//! cargo fuzz run fuzz_cloud_router

#![no_main]

use libfuzzer_sys::fuzz_target;
use pethome::adapters::cloud::CloudRouter;
use pethome::app::commands::AppCommand;
use pethome::input::RemoteCommand;

fuzz_target!(|data: &[u8]| {
    let router = CloudRouter::new("pethome");

    // First NUL separates topic suffix from payload.
    let (suffix, payload) = match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (&data[..0], data),
    };
    let Ok(suffix) = core::str::from_utf8(suffix) else {
        return;
    };
    let topic = format!("pethome/{suffix}");

    let Some(inbound) = router.route(&topic, payload) else {
        return;
    };
    match (inbound.command, inbound.reply) {
        (AppCommand::SetMuted(on), Some((RemoteCommand::SetMute, reply)))
        | (AppCommand::SetAcknowledged(on), Some((RemoteCommand::SetAcknowledged, reply))) => {
            assert_eq!(on, reply != 0);
        }
        (AppCommand::SetPositionInterval { interval_ms }, Some((_, minutes))) => {
            assert!(minutes >= 0);
            assert_eq!(interval_ms, (minutes as u32).saturating_mul(60_000));
        }
        (AppCommand::SetDistance(d), _) => assert!(d.is_finite()),
        _ => {}
    }
});
