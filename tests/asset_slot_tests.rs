use shader_lab::asset::AssetSlot;
use std::sync::mpsc;
use std::time::Duration;

#[test]
fn stays_pending_until_the_result_arrives() {
    let (_sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    let mut slot = AssetSlot::from_channel(receiver);

    assert!(slot.is_pending());
    assert!(!slot.poll());
    assert!(slot.get().is_none());
    assert!(slot.is_pending());
}

#[test]
fn resolves_exactly_once() {
    let (sender, receiver) = mpsc::channel();
    let mut slot = AssetSlot::from_channel(receiver);

    sender.send(Ok(42u32)).unwrap();

    // The resolving poll returns true; every later poll is false.
    assert!(slot.poll());
    assert_eq!(slot.get(), Some(&42));
    assert!(!slot.poll());
    assert!(!slot.poll());
    assert_eq!(slot.get(), Some(&42));
}

#[test]
fn load_errors_are_recoverable() {
    let (sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    let mut slot = AssetSlot::from_channel(receiver);

    sender.send(Err(anyhow::anyhow!("file not found"))).unwrap();

    // Failure never reports as a resolution and never panics.
    assert!(!slot.poll());
    assert!(slot.is_failed());
    assert!(slot.get().is_none());
    assert!(!slot.poll());
}

#[test]
fn dropped_loader_marks_the_slot_failed() {
    let (sender, receiver) = mpsc::channel::<anyhow::Result<u32>>();
    let mut slot = AssetSlot::from_channel(receiver);

    drop(sender);
    assert!(!slot.poll());
    assert!(slot.is_failed());
}

#[test]
fn spawned_load_arrives_at_a_later_poll() {
    let mut slot = AssetSlot::spawn(|| Ok(7u32));

    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    let mut resolved = false;
    while std::time::Instant::now() < deadline {
        if slot.poll() {
            resolved = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    assert!(resolved);
    assert_eq!(slot.get(), Some(&7));
}
