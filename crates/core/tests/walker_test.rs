//! Tests for the operator-list walker: ordering, path pairing, and per-image
//! failure isolation.

use blueline_core::error::{PlanError, Result};
use blueline_core::interp::{CleanupBridge, PageDevice, PageWalker};
use blueline_core::model::{
    ObjectStore, OpCode, Operand, Operation, OperatorList, PageImage, PathGroup,
};
use blueline_core::present::PageView;
use blueline_core::processor::{FixedProcessor, ImageProcessor, ProcessedArtifact};
use bytes::Bytes;

// ============================================================================
// Helpers
// ============================================================================

fn rgb_image(width: u32, height: u32) -> PageImage {
    PageImage {
        data: Bytes::from(vec![0u8; (width * height * 3) as usize]),
        width,
        height,
        kind: 2,
    }
}

fn image_op(name: &str) -> (u16, Vec<Operand>) {
    (85, vec![Operand::Text(name.to_string())])
}

fn list_from(ops: Vec<(u16, Vec<Operand>)>) -> OperatorList {
    let (codes, args): (Vec<u16>, Vec<Vec<Operand>>) = ops.into_iter().unzip();
    OperatorList::from_arrays(codes, args).unwrap()
}

/// Records every callback in arrival order.
#[derive(Default)]
struct RecordingDevice {
    events: Vec<String>,
}

impl PageDevice for RecordingDevice {
    fn note_op(&mut self, index: usize, op: &Operation) {
        self.events.push(format!("op {index} {}", op.code.name()));
    }

    fn paint_path(&mut self, group: &PathGroup) {
        for (code, args) in group.pairs() {
            self.events.push(format!("path {} {args:?}", code.name()));
        }
    }

    fn render_image(&mut self, name: &str, _image: &PageImage) -> Result<()> {
        self.events.push(format!("image {name}"));
        Ok(())
    }
}

/// Fails its first call, succeeds afterwards.
#[derive(Default)]
struct FlakyProcessor {
    calls: usize,
}

impl ImageProcessor for FlakyProcessor {
    fn process(
        &mut self,
        _pixels: &[u8],
        width: u32,
        height: u32,
        _bits_per_pixel: u8,
    ) -> Result<ProcessedArtifact> {
        self.calls += 1;
        if self.calls == 1 {
            return Err(PlanError::ExternalProcessing(format!(
                "unsupported dimensions: {width}x{height}"
            )));
        }
        Ok(ProcessedArtifact {
            image: vec![1, 2, 3],
            mime: "application/octet-stream",
            overlay: None,
        })
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn walk_preserves_operation_order() {
    let mut objects = ObjectStore::new();
    objects.insert("img1", rgb_image(2, 2));

    let list = list_from(vec![
        (10, vec![]), // save
        (
            91, // constructPath
            vec![
                Operand::Array(vec![Operand::Num(13.0), Operand::Num(14.0)]),
                Operand::Array(vec![
                    Operand::Array(vec![Operand::Num(0.0), Operand::Num(0.0)]),
                    Operand::Array(vec![Operand::Num(5.0), Operand::Num(5.0)]),
                ]),
            ],
        ),
        image_op("img1"),
        (11, vec![]), // restore
    ]);

    let mut device = RecordingDevice::default();
    let stats = PageWalker::new(&mut device, &objects).walk(&list).unwrap();

    assert_eq!(
        device.events,
        vec![
            "op 0 save",
            "op 1 constructPath",
            "path moveTo [0.0, 0.0]",
            "path lineTo [5.0, 5.0]",
            "op 2 paintImageXObject",
            "image img1",
            "op 3 restore",
        ]
    );
    assert_eq!(stats.operations, 4);
    assert_eq!(stats.path_groups, 1);
    assert_eq!(stats.images_dispatched, 1);
    assert_eq!(stats.images_failed, 0);
}

#[test]
fn unrecognized_operators_pass_through() {
    let list = list_from(vec![(1, vec![]), (4000, vec![Operand::Num(7.0)]), (31, vec![])]);
    let objects = ObjectStore::new();
    let mut device = RecordingDevice::default();
    let stats = PageWalker::new(&mut device, &objects).walk(&list).unwrap();
    assert_eq!(stats.operations, 3);
    assert_eq!(stats.images_dispatched, 0);
    // Still observed in order, just not acted on.
    assert_eq!(device.events[1], "op 1 unknown");
}

#[test]
fn malformed_path_block_aborts_the_walk() {
    let list = list_from(vec![
        (
            91,
            vec![
                Operand::Array(vec![Operand::Num(13.0), Operand::Num(14.0)]),
                Operand::Array(vec![Operand::Array(vec![Operand::Num(0.0)])]),
            ],
        ),
        (10, vec![]),
    ]);
    let objects = ObjectStore::new();
    let mut device = RecordingDevice::default();
    let err = PageWalker::new(&mut device, &objects)
        .walk(&list)
        .unwrap_err();
    assert!(matches!(
        err,
        PlanError::MalformedOperatorArgs { ops: 2, args: 1 }
    ));
    // The second operation was never reached.
    assert_eq!(device.events.len(), 1);
}

// ============================================================================
// Image dispatch isolation
// ============================================================================

#[test]
fn failed_dispatch_does_not_block_later_images() {
    let mut objects = ObjectStore::new();
    objects.insert("first", rgb_image(4, 4));
    objects.insert("second", rgb_image(8, 8));

    let list = list_from(vec![image_op("first"), image_op("second")]);

    let mut processor = FlakyProcessor::default();
    let mut view = PageView::new();
    let mut bridge = CleanupBridge::new(&mut processor, &mut view);
    let stats = PageWalker::new(&mut bridge, &objects).walk(&list).unwrap();

    assert_eq!(stats.images_failed, 1);
    assert_eq!(stats.images_dispatched, 1);
    assert_eq!(processor.calls, 2);
    // The second image's result landed on the surface.
    assert_eq!(view.generation(), 1);
}

#[test]
fn unknown_encoding_is_isolated_per_image() {
    let mut objects = ObjectStore::new();
    objects.insert(
        "odd",
        PageImage {
            data: Bytes::from_static(&[0u8; 12]),
            width: 2,
            height: 2,
            kind: 9,
        },
    );
    objects.insert("fine", rgb_image(2, 2));

    let list = list_from(vec![image_op("odd"), image_op("fine")]);

    let mut processor = FixedProcessor::new();
    let mut view = PageView::new();
    let mut bridge = CleanupBridge::new(&mut processor, &mut view);
    let stats = PageWalker::new(&mut bridge, &objects).walk(&list).unwrap();

    assert_eq!(stats.images_failed, 1);
    assert_eq!(stats.images_dispatched, 1);
    // Only the well-formed image ever reached the processor.
    assert_eq!(processor.calls.len(), 1);
    assert_eq!(processor.calls[0], (12, 2, 2, 24));
}

#[test]
fn missing_object_is_isolated_per_image() {
    let mut objects = ObjectStore::new();
    objects.insert("present", rgb_image(2, 2));

    let list = list_from(vec![image_op("absent"), image_op("present")]);

    let mut processor = FixedProcessor::new();
    let mut view = PageView::new();
    let mut bridge = CleanupBridge::new(&mut processor, &mut view);
    let stats = PageWalker::new(&mut bridge, &objects).walk(&list).unwrap();

    assert_eq!(stats.images_failed, 1);
    assert_eq!(stats.images_dispatched, 1);
    assert_eq!(processor.calls.len(), 1);
}

#[test]
fn dispatch_hands_over_exact_buffer_and_depth() {
    let mut objects = ObjectStore::new();
    objects.insert(
        "bw",
        PageImage {
            data: Bytes::from(vec![0xff; 10]),
            width: 16,
            height: 5,
            kind: 1,
        },
    );

    let list = list_from(vec![image_op("bw")]);
    let mut processor = FixedProcessor::new();
    let mut view = PageView::new();
    let mut bridge = CleanupBridge::new(&mut processor, &mut view);
    PageWalker::new(&mut bridge, &objects).walk(&list).unwrap();

    assert_eq!(processor.calls, vec![(10, 16, 5, 1)]);
}

#[test]
fn opcode_dispatch_matches_wire_codes() {
    // The walker keys off decoded opcodes; make sure the wire codes the
    // collaborator uses land on the right variants.
    assert_eq!(OpCode::from_code(85), OpCode::PaintImageXObject);
    assert_eq!(OpCode::from_code(91), OpCode::ConstructPath);
}
