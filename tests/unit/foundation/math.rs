use super::*;

#[test]
fn digest_is_independent_of_chunking() {
    let mut whole = PixelDigest::default();
    whole.update(b"card");
    let mut split = PixelDigest::default();
    split.update(b"ca");
    split.update(b"rd");
    assert_eq!(whole.digest(), split.digest());

    let mut reversed = PixelDigest::default();
    reversed.update(b"drac");
    assert_ne!(whole.digest(), reversed.digest());
}

#[test]
fn empty_digest_is_the_fnv_offset_basis() {
    assert_eq!(PixelDigest::default().digest(), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn coverage_scaling_endpoints() {
    assert_eq!(scale_by_coverage(255, 255), 255);
    assert_eq!(scale_by_coverage(200, 0), 0);
    assert_eq!(scale_by_coverage(200, 255), 200);
    assert_eq!(scale_by_coverage(255, 128), 128);
}
