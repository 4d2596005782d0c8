use super::*;
use crate::foundation::error::VpeError;

#[test]
fn chunk_id_field_width_follows_generation() {
    let v10 = Resource::new(IpLevel::Vpe10);
    let v11 = Resource::new(IpLevel::Vpe11);
    assert_eq!(v10.hw().chunk_desc_field(3), 3 << 16);
    assert_eq!(v10.hw().chunk_desc_field(17), 1 << 16);
    assert_eq!(v11.hw().chunk_desc_field(17), 17 << 16);
    assert_eq!(v11.level(), IpLevel::Vpe11);
}

#[test]
fn only_vpe11_can_sync() {
    let mut r = BufRegion::counting(0);
    assert_eq!(
        Resource::new(IpLevel::Vpe10).hw().write_collab_sync(&mut r, 1),
        Err(VpeError::CollaborationNotSupported)
    );
    Resource::new(IpLevel::Vpe11)
        .hw()
        .write_collab_sync(&mut r, 1)
        .unwrap();
    assert_eq!(r.used(), 8);
}

#[test]
fn ip_level_uses_dotted_names() {
    assert_eq!(serde_json::to_string(&IpLevel::Vpe10).unwrap(), "\"1.0\"");
    let lvl: IpLevel = serde_json::from_str("\"1.1\"").unwrap();
    assert_eq!(lvl, IpLevel::Vpe11);
}
