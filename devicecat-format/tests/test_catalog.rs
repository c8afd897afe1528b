use devicecat_common::{ByteView, Endian};
use devicecat_format::{
    decode, raw, verify, CatalogErrorKind, DecodeOptions, DeviceCatalog, Digest,
};
use devicecat_testutils::{fixture, CatalogBuilder, TestDevice};

use similar_asserts::assert_eq;

type Error = Box<dyn std::error::Error>;

#[test]
fn test_parse_three_devices() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/three_devices.bin"))?;
    let catalog = DeviceCatalog::parse(&view)?;

    insta::assert_debug_snapshot!(catalog, @r###"
    DeviceCatalog {
        signature: 0xcafef00d,
        timestamp: 1700000000,
        digest: Digest(d771f9e6fd2bb995150a6c29554449c5539b487e797e8af6d8cf2d5f0ac81972),
        devices: [
            DeviceRecord {
                name: "Living Room Hub",
                mac: MacAddress(aa:bb:cc:dd:ee:ff),
                firmware: FirmwareVersion {
                    major: 1,
                    minor: 10,
                },
            },
            DeviceRecord {
                name: "Front Door Lock",
                mac: MacAddress(00:11:22:33:44:55),
                firmware: FirmwareVersion {
                    major: 2,
                    minor: 3,
                },
            },
            DeviceRecord {
                name: "Garage Sensor",
                mac: MacAddress(0a:1b:2c:3d:4e:5f),
                firmware: FirmwareVersion {
                    major: 16,
                    minor: 0,
                },
            },
        ],
    }
    "###);
    Ok(())
}

#[test]
fn test_header_fields() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/three_devices.bin"))?;
    let decoded = decode(&view)?;

    assert!(decoded.header.has_valid_signature());
    assert_eq!(decoded.header.device_count, 3);
    assert_eq!(decoded.header.timestamp, 1_700_000_000);
    assert_eq!(decoded.record_region.len(), 3 * raw::RECORD_SIZE);
    assert_eq!(decoded.trailing_len(), 0);
    assert!(verify(decoded.record_region, &decoded.header.digest));
    Ok(())
}

#[test]
fn test_corrupted_record_region() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/corrupted.bin"))?;

    let decoded = decode(&view)?;
    assert!(!verify(decoded.record_region, &decoded.header.digest));

    let err = DeviceCatalog::parse(&view).unwrap_err();
    assert_eq!(err.kind(), CatalogErrorKind::IntegrityMismatch);
    Ok(())
}

#[test]
fn test_truncated_records() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/truncated.bin"))?;
    let err = DeviceCatalog::parse(&view).unwrap_err();
    assert_eq!(err.kind(), CatalogErrorKind::TruncatedRecords);
    Ok(())
}

#[test]
fn test_empty_catalog() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/empty.bin"))?;
    assert_eq!(view.len(), raw::HEADER_SIZE);

    let catalog = DeviceCatalog::parse(&view)?;
    assert!(catalog.is_empty());
    assert_eq!(catalog.header().digest, Digest::compute(b""));
    Ok(())
}

#[test]
fn test_trailing_bytes_not_hashed() -> Result<(), Error> {
    let view = ByteView::open(fixture("catalog/trailing.bin"))?;

    let decoded = decode(&view)?;
    assert_eq!(decoded.trailing_len(), 4);

    let catalog = DeviceCatalog::parse(&view)?;
    assert_eq!(catalog.len(), 3);
    Ok(())
}

#[test]
fn test_round_trip() -> Result<(), Error> {
    let builder = CatalogBuilder::new()
        .timestamp(42)
        .device("Desk Lamp", 0x0102_0304_0506, 0, 1)
        .device("", 0, 0xff, 0xff)
        .device("Über Sensor", 0xffff_ffff_ffff, 7, 9);
    let buf = builder.build();

    let catalog = DeviceCatalog::parse(&buf)?;
    assert_eq!(catalog.header().timestamp, 42);

    let fields: Vec<_> = catalog
        .devices()
        .iter()
        .map(|d| {
            (
                d.name.as_str(),
                d.mac.value(),
                d.major_version(),
                d.minor_version(),
            )
        })
        .collect();
    let expected: Vec<(&str, u64, u8, u8)> = vec![
        ("Desk Lamp", 0x0102_0304_0506, 0, 1),
        ("", 0, 0xff, 0xff),
        ("Über Sensor", 0xffff_ffff_ffff, 7, 9),
    ];
    assert_eq!(fields, expected);
    Ok(())
}

#[test]
fn test_round_trip_full_catalog() -> Result<(), Error> {
    let builder = (0..=254u8).fold(CatalogBuilder::new(), |builder, i| {
        builder.device(&format!("device-{i}"), u64::from(i) << 40, i, !i)
    });
    let buf = builder.build();
    assert_eq!(buf.len(), raw::HEADER_SIZE + 255 * raw::RECORD_SIZE);

    let catalog = DeviceCatalog::parse(&buf)?;
    assert_eq!(catalog.len(), 255);
    for (i, device) in catalog.into_iter().enumerate() {
        assert_eq!(device.name, format!("device-{i}"));
        assert_eq!(device.mac.octets()[0], i as u8);
        assert_eq!(device.minor_version(), !(i as u8));
    }
    Ok(())
}

#[test]
fn test_unterminated_name() -> Result<(), Error> {
    let buf = CatalogBuilder::new()
        .raw_device(TestDevice {
            name: vec![b'n'; raw::NAME_SIZE],
            mac: 1,
            major: 1,
            minor: 0,
        })
        .build();

    let catalog = DeviceCatalog::parse(&buf)?;
    assert_eq!(catalog.devices()[0].name, "n".repeat(raw::NAME_SIZE));
    assert_eq!(catalog.devices()[0].mac.to_string(), "00:00:00:00:00:01");
    Ok(())
}

#[test]
fn test_any_flipped_record_byte_fails() {
    let builder = CatalogBuilder::new().device("Smoke Detector", 0xaabb_ccdd_eeff, 3, 1);
    let buf = builder.build();

    for offset in raw::HEADER_SIZE..buf.len() {
        let mut corrupted = buf.clone();
        corrupted[offset] ^= 0x01;

        let err = DeviceCatalog::parse(&corrupted).unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::IntegrityMismatch, "{offset}");
    }
}

#[test]
fn test_wrong_digest() {
    let builder = CatalogBuilder::new().device("Blinds", 0x10, 1, 1);
    let buf = builder.build_with_digest([0xab; 32]);

    let err = DeviceCatalog::parse(&buf).unwrap_err();
    assert_eq!(err.kind(), CatalogErrorKind::IntegrityMismatch);
}

#[test]
fn test_digest_covers_records_only() {
    let builder = CatalogBuilder::new().device("Doorbell", 0x22, 1, 0);
    let mut buf = builder.build();

    // the timestamp is not part of the digest
    buf[raw::TIMESTAMP_OFFSET] ^= 0xff;
    assert!(DeviceCatalog::parse(&buf).is_ok());
}

#[test]
fn test_strict_signature() {
    let buf = CatalogBuilder::new().signature(0x1234_5678).build();
    let strict = DecodeOptions::new().check_signature(true);

    assert!(DeviceCatalog::parse(&buf).is_ok());
    let err = DeviceCatalog::parse_with_options(&buf, strict).unwrap_err();
    assert_eq!(err.kind(), CatalogErrorKind::BadSignature);

    let buf = CatalogBuilder::new().build();
    assert!(DeviceCatalog::parse_with_options(&buf, strict).is_ok());
}

#[test]
fn test_mac_rendering_independent_of_host() -> Result<(), Error> {
    let buf = CatalogBuilder::new()
        .device("Router", 0xaabb_ccdd_eeff, 1, 0)
        .build();
    let catalog = DeviceCatalog::parse(&buf)?;
    let mac = catalog.devices()[0].mac;

    assert_eq!(mac.render(Endian::Little), "aa:bb:cc:dd:ee:ff");
    assert_eq!(mac.render(Endian::Big), "aa:bb:cc:dd:ee:ff");
    assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize_json() -> Result<(), Error> {
    let buf = CatalogBuilder::new()
        .timestamp(7)
        .device("Plug", 0x0102_0304_0506, 1, 2)
        .build();
    let catalog = DeviceCatalog::parse(&buf)?;

    let value = serde_json::to_value(&catalog)?;
    assert_eq!(value["header"]["timestamp"], 7);
    assert_eq!(value["devices"][0]["name"], "Plug");
    assert_eq!(value["devices"][0]["mac"], "01:02:03:04:05:06");
    assert_eq!(value["devices"][0]["firmware"]["minor"], 2);
    Ok(())
}
