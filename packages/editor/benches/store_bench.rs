use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use vitrine_editor::{EditorStore, GroupId, PageSnapshot};
use vitrine_model::settings::{FaqSettings, SingleShape};
use vitrine_model::SequentialIds;

/// A page at the upper end of real sizes: 40 sections, 20 children each
fn large_page() -> PageSnapshot {
    let template: Vec<_> = (0..40)
        .map(|i| {
            let items: Vec<_> = (0..20)
                .map(|j| json!({ "id": format!("q{i}-{j}"), "question": "Late checkout?", "answer": "Until noon." }))
                .collect();
            let section_type = if i % 2 == 0 { "faq" } else { "Collapsible" };
            json!({ "id": format!("s{i}"), "type": section_type, "name": "FAQ", "settings": { "items": items } })
        })
        .collect();

    PageSnapshot::from_value(json!({ "template": template })).unwrap()
}

fn load_large_page(c: &mut Criterion) {
    let snapshot = large_page();

    c.bench_function("load_large_page", |b| {
        b.iter(|| {
            let mut store = EditorStore::new();
            store.init(black_box(snapshot.clone())).unwrap();
            store
        })
    });
}

fn child_mutations(c: &mut Criterion) {
    let mut store = EditorStore::with_id_source(SequentialIds::new());
    store.init(large_page()).unwrap();

    c.bench_function("toggle_and_reorder_children", |b| {
        b.iter(|| {
            store.toggle_child_visibility(GroupId::Template, black_box("s39"), "q39-19");
            store.reorder_child_blocks(GroupId::Template, black_box("s39"), "q39-0", "q39-19");
        })
    });

    c.bench_function("add_child_block", |b| {
        b.iter(|| store.add_child_block::<FaqSettings>(GroupId::Template, black_box("s20"), SingleShape))
    });
}

fn section_reorder(c: &mut Criterion) {
    let mut store = EditorStore::new();
    store.init(large_page()).unwrap();

    c.bench_function("move_section", |b| {
        b.iter(|| store.move_section(GroupId::Template, black_box("s0"), black_box("s39")))
    });
}

criterion_group!(benches, load_large_page, child_mutations, section_reorder);
criterion_main!(benches);
