//! Property tests for the canonical serializer.

use easel_core::{
    ColorValue, ContainerAttrs, DesignTree, Direction, EllipseAttrs, FontStyle, FontWeight,
    GridAttrs, ImageAttrs, LineAttrs, Node, NodeKind, Padding, PathAttrs, Point, RectAttrs, Size,
    StackAttrs, TextAttrs, TextVariant,
};
use easel_io::{export, import, validate_round_trip, ExportOptions};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_color() -> impl Strategy<Value = Option<ColorValue>> {
    prop_oneof![
        Just(None),
        "#[0-9a-f]{6}".prop_map(|s| Some(ColorValue(s))),
        Just(Some(ColorValue::from("transparent"))),
        (0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(r, g, b)| Some(ColorValue(format!("rgb({r}, {g}, {b})")))),
    ]
}

fn arb_coord() -> impl Strategy<Value = f64> {
    -5000.0f64..5000.0
}

fn arb_padding() -> impl Strategy<Value = Option<Padding>> {
    prop_oneof![
        Just(None),
        (0.0f64..64.0).prop_map(|v| Some(Padding::Uniform(v))),
        (0.0f64..64.0, 0.0f64..64.0, 0.0f64..64.0, 0.0f64..64.0).prop_map(
            |(top, right, bottom, left)| Some(Padding::Sides {
                top,
                right,
                bottom,
                left,
            })
        ),
    ]
}

fn arb_weight() -> impl Strategy<Value = Option<FontWeight>> {
    prop_oneof![
        Just(None),
        (1u16..10).prop_map(|n| Some(FontWeight::Numeric(f64::from(n) * 100.0))),
        prop_oneof![Just("bold"), Just("normal"), Just("600"), Just("lighter")]
            .prop_map(|k| Some(FontWeight::from(k))),
    ]
}

fn arb_variant() -> impl Strategy<Value = Option<TextVariant>> {
    proptest::option::of(prop_oneof![
        Just(TextVariant::H1),
        Just(TextVariant::H2),
        Just(TextVariant::H3),
        Just(TextVariant::Body),
        Just(TextVariant::Caption),
    ])
}

fn arb_style() -> impl Strategy<Value = Option<FontStyle>> {
    proptest::option::of(prop_oneof![
        Just(FontStyle::Normal),
        Just(FontStyle::Italic),
        Just(FontStyle::Oblique),
    ])
}

/// Attribute values an editor might attach that the IR does not model.
fn arb_extra() -> impl Strategy<Value = Map<String, Value>> {
    let value = prop_oneof![
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ];
    proptest::collection::btree_map("x[A-Z][a-z]{0,6}", value, 0..3)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_path() -> impl Strategy<Value = PathAttrs> {
    (
        proptest::collection::vec(arb_coord(), 0..12),
        any::<bool>(),
        arb_color(),
        arb_color(),
    )
        .prop_map(|(points, closed, fill, stroke)| PathAttrs {
            points,
            closed,
            fill,
            stroke,
            ..Default::default()
        })
}

fn arb_leaf() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        (
            arb_color(),
            arb_color(),
            proptest::option::of(0.0f64..10.0),
            proptest::option::of(0.0f64..50.0),
            arb_extra(),
        )
            .prop_map(|(fill, stroke, stroke_width, radius, extra)| NodeKind::Rect(RectAttrs {
                fill,
                stroke,
                stroke_width,
                radius,
                extra,
            })),
        (arb_color(), arb_color()).prop_map(|(fill, stroke)| NodeKind::Ellipse(EllipseAttrs {
            fill,
            stroke,
            ..Default::default()
        })),
        (
            "[ -~]{0,24}",
            arb_color(),
            proptest::option::of(8.0f64..72.0),
            arb_weight(),
            arb_style(),
            arb_variant(),
        )
            .prop_map(|(text, color, font_size, font_weight, font_style, variant)| {
                NodeKind::Text(TextAttrs {
                    text,
                    color,
                    font_size,
                    font_weight,
                    font_style,
                    variant,
                    ..Default::default()
                })
            }),
        "[a-z:/.]{0,20}".prop_map(|src| NodeKind::Image(ImageAttrs {
            src,
            ..Default::default()
        })),
        (arb_coord(), arb_coord(), arb_coord(), arb_coord()).prop_map(|(a, b, c, d)| {
            NodeKind::Line(LineAttrs {
                points: [a, b, c, d],
                stroke: Some(ColorValue::from("#000000")),
                stroke_width: Some(1.0),
                ..Default::default()
            })
        }),
        arb_path().prop_map(NodeKind::Curve),
        arb_path().prop_map(NodeKind::Polygon),
        arb_path().prop_map(NodeKind::Draw),
        ("x-[a-z]{1,8}", arb_extra())
            .prop_map(|(kind, attributes)| NodeKind::Unknown { kind, attributes }),
    ]
}

fn arb_kind() -> impl Strategy<Value = NodeKind> {
    arb_leaf().prop_recursive(3, 32, 4, |inner| {
        let children =
            move || proptest::collection::vec(inner.clone().prop_map(|kind| Node::new("", kind)), 0..4);
        let container = {
            let children = children.clone();
            move || {
                (children(), arb_color(), arb_padding(), proptest::option::of(0.0f64..24.0)).prop_map(
                    |(children, background, padding, radius)| ContainerAttrs {
                        children,
                        background,
                        padding,
                        radius,
                        ..Default::default()
                    },
                )
            }
        };
        prop_oneof![
            container().prop_map(NodeKind::Frame),
            container().prop_map(NodeKind::Box),
            container().prop_map(NodeKind::Group),
            (children(), proptest::option::of(0.0f64..32.0), any::<bool>(), arb_padding()).prop_map(
                |(children, gap, row, padding)| NodeKind::Stack(StackAttrs {
                    direction: if row { Direction::Row } else { Direction::Column },
                    gap,
                    padding,
                    children,
                    ..Default::default()
                })
            ),
            (children(), 1u32..6).prop_map(|(children, columns)| NodeKind::Grid(GridAttrs {
                columns,
                children,
                ..Default::default()
            })),
        ]
    })
}

/// Per-node fields the generator varies besides the kind.
#[derive(Debug, Clone)]
struct Dressing {
    name: Option<String>,
    opacity: Option<f64>,
}

fn arb_dressing() -> impl Strategy<Value = Dressing> {
    (proptest::option::of("[ -~]{0,12}"), proptest::option::of(0.0f64..=1.0))
        .prop_map(|(name, opacity)| Dressing { name, opacity })
}

/// Give every node a unique id and a position/size; dress nodes in turn.
fn finish(node: &mut Node, next: &mut usize, dressings: &[Dressing]) {
    *next += 1;
    node.id = format!("n{next}").into();
    node.position = Some(Point::new(*next as f64 * 1.5, *next as f64 * 0.25));
    node.size = Some(Size::new(40.0, 20.0));
    if let Some(dressing) = dressings.get(*next % dressings.len().max(1)) {
        node.name = dressing.name.clone();
        node.opacity = dressing.opacity;
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            finish(child, next, dressings);
        }
    }
}

fn arb_tree() -> impl Strategy<Value = DesignTree> {
    (
        proptest::collection::vec(arb_kind(), 0..5),
        proptest::collection::vec(arb_dressing(), 1..6),
        proptest::option::of("[0-9]\\.[0-9]"),
        proptest::option::of("[ -~]{0,16}"),
    )
        .prop_map(|(kinds, dressings, version, name)| {
            let mut tree = DesignTree::with_frame(800.0, 600.0);
            tree.version = version;
            tree.name = name;
            let mut next = 0;
            for kind in kinds {
                let mut node = Node::new("", kind);
                finish(&mut node, &mut next, &dressings);
                tree.push(node);
            }
            tree
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn import_inverts_export(tree in arb_tree()) {
        let text = export(&tree, &ExportOptions::default().without_metadata()).unwrap();
        let restored = import(&text).unwrap();
        prop_assert_eq!(restored, tree);
    }

    #[test]
    fn import_inverts_enveloped_export(tree in arb_tree()) {
        let text = export(&tree, &ExportOptions::default().compact()).unwrap();
        let restored = import(&text).unwrap();
        prop_assert_eq!(restored, tree);
    }

    #[test]
    fn round_trip_report_is_valid(tree in arb_tree()) {
        let report = validate_round_trip(&tree);
        prop_assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn export_is_deterministic(tree in arb_tree()) {
        let options = ExportOptions::default().without_metadata().compact();
        prop_assert_eq!(export(&tree, &options).unwrap(), export(&tree, &options).unwrap());
    }
}
