use criterion::{black_box, criterion_group, criterion_main, Criterion};
use easel::{export, DesignTree, ExportFormat, ExportSettings, Node, NodeKind};
use easel_core::{Direction, RectAttrs, StackAttrs, TextAttrs};

fn sample_tree(rows: usize) -> DesignTree {
    let mut tree = DesignTree::with_frame(1280.0, 720.0);
    for row in 0..rows {
        let y = row as f64 * 40.0;
        let mut label = TextAttrs::new(format!("Row {row}"));
        label.font_size = Some(14.0 + (row % 3) as f64 * 2.0);
        label.color = Some("#111827".into());
        tree.push(
            Node::new(
                format!("row-{row}"),
                NodeKind::Stack(StackAttrs {
                    direction: Direction::Row,
                    gap: Some(8.0),
                    ..Default::default()
                }),
            )
            .at(0.0, y)
            .sized(1280.0, 32.0)
            .with_child(
                Node::new(
                    format!("swatch-{row}"),
                    NodeKind::Rect(RectAttrs {
                        fill: Some(format!("#{:02x}6699", row % 256).into()),
                        radius: Some(4.0),
                        ..Default::default()
                    }),
                )
                .at(0.0, y)
                .sized(32.0, 32.0),
            )
            .with_child(
                Node::new(format!("label-{row}"), NodeKind::Text(label))
                    .at(40.0, y)
                    .sized(200.0, 32.0),
            ),
        );
    }
    tree
}

fn bench_exports(c: &mut Criterion) {
    let tree = sample_tree(150);
    let settings = ExportSettings::default();

    for format in ExportFormat::ALL {
        c.bench_function(&format!("export_{format}"), |b| {
            b.iter(|| export(black_box(&tree), format, &settings))
        });
    }
}

criterion_group!(benches, bench_exports);
criterion_main!(benches);
