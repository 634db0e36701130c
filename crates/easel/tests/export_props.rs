//! Property tests across every emitter.

use easel::{
    export, extract_tokens, DesignTree, ExportFormat, ExportOptions, ExportSettings, Node,
    NodeKind, TokenOptions, TokenType,
};
use easel_core::{
    ColorValue, ContainerAttrs, Direction, EllipseAttrs, GridAttrs, Point, RectAttrs, Size,
    StackAttrs, TextAttrs,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_color() -> impl Strategy<Value = Option<ColorValue>> {
    prop_oneof![
        Just(None),
        "#[0-9a-f]{6}".prop_map(|s| Some(ColorValue(s))),
        "#[0-9A-F]{3}".prop_map(|s| Some(ColorValue(s))),
        Just(Some(ColorValue::from("transparent"))),
    ]
}

fn arb_leaf() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        (arb_color(), arb_color(), proptest::option::of(0.0f64..24.0)).prop_map(
            |(fill, stroke, radius)| NodeKind::Rect(RectAttrs {
                stroke_width: stroke.as_ref().map(|_| 1.0),
                fill,
                stroke,
                radius,
                ..Default::default()
            })
        ),
        arb_color().prop_map(|fill| NodeKind::Ellipse(EllipseAttrs {
            fill,
            ..Default::default()
        })),
        ("[ -~]{0,16}", arb_color(), proptest::option::of(10.0f64..40.0)).prop_map(
            |(text, color, font_size)| NodeKind::Text(TextAttrs {
                text,
                color,
                font_size,
                ..Default::default()
            })
        ),
    ]
}

fn arb_kind() -> impl Strategy<Value = NodeKind> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        let children =
            move || proptest::collection::vec(inner.clone().prop_map(|kind| Node::new("", kind)), 0..4);
        prop_oneof![
            (children(), arb_color()).prop_map(|(children, background)| {
                NodeKind::Group(ContainerAttrs {
                    children,
                    background,
                    ..Default::default()
                })
            }),
            (children(), proptest::option::of(0.0f64..24.0)).prop_map(|(children, gap)| {
                NodeKind::Stack(StackAttrs {
                    direction: Direction::Row,
                    gap,
                    children,
                    ..Default::default()
                })
            }),
            (children(), 1u32..4).prop_map(|(children, columns)| NodeKind::Grid(GridAttrs {
                columns,
                children,
                ..Default::default()
            })),
        ]
    })
}

fn finish(node: &mut Node, next: &mut usize) {
    *next += 1;
    node.id = format!("n{next}").into();
    node.position = Some(Point::new(*next as f64 * 4.0, *next as f64 * 2.0));
    node.size = Some(Size::new(48.0, 24.0));
    if let Some(children) = node.children_mut() {
        for child in children {
            finish(child, next);
        }
    }
}

fn arb_tree() -> impl Strategy<Value = DesignTree> {
    proptest::collection::vec(arb_kind(), 0..5).prop_map(|kinds| {
        let mut tree = DesignTree::with_frame(800.0, 600.0);
        let mut next = 0;
        for kind in kinds {
            let mut node = Node::new("", kind);
            finish(&mut node, &mut next);
            tree.push(node);
        }
        tree
    })
}

fn settings() -> ExportSettings {
    ExportSettings::default().with_json(ExportOptions::default().without_metadata())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn emitters_are_deterministic(tree in arb_tree()) {
        let settings = settings();
        let copy = tree.clone();
        for format in ExportFormat::ALL {
            prop_assert_eq!(
                export(&tree, format, &settings).unwrap(),
                export(&copy, format, &settings).unwrap()
            );
        }
    }

    #[test]
    fn deduplicated_tokens_have_distinct_values(tree in arb_tree()) {
        let catalog = extract_tokens(&tree, &TokenOptions::default());
        for token_type in TokenType::ALL {
            let mut seen = HashSet::new();
            for token in catalog.class(token_type).values() {
                let key = serde_json::to_string(&token.value).unwrap();
                prop_assert!(seen.insert(key), "duplicate {:?} value", token_type);
                prop_assert!(token.count >= 1);
            }
        }
    }

    #[test]
    fn color_counts_cover_every_sighting(tree in arb_tree()) {
        let deduplicated = extract_tokens(&tree, &TokenOptions::default());
        let raw = extract_tokens(&tree, &TokenOptions { semantic: true, deduplicate: false });
        let total: usize = deduplicated.class(TokenType::Color).values().map(|t| t.count).sum();
        prop_assert_eq!(total, raw.class(TokenType::Color).len());
    }

    #[test]
    fn roblox_script_names_are_unique(tree in arb_tree()) {
        let script = export(&tree, ExportFormat::Roblox, &settings()).unwrap();
        let mut names = HashSet::new();
        for line in script.lines().map(str::trim_start).filter(|line| line.starts_with("local ")) {
            let name = line["local ".len()..].split(' ').next().unwrap_or_default();
            prop_assert!(names.insert(name.to_string()), "{} declared twice", name);
        }
    }
}
