use snapfold_aggregate::{SnapshotInfo, TypeGroup};
use snapfold_types::RawNativeObject;

use crate::format::{format_bytes, format_count};
use crate::host::{GroupStyle, RenderHost, ScrollPosition, Width};

/// Shown in place of an empty object name.
pub const NO_NAME: &str = "[NoName]";

/// Draws the native-object view: a summary row, then one foldable header per
/// type group in sorted order, with members listed under expanded headers.
///
/// Foldout changes apply to `current` once the pass is done, and already
/// decide what is drawn in this pass.
pub fn draw_native_objects<H: RenderHost + ?Sized>(
    host: &mut H,
    current: &mut SnapshotInfo,
    last: Option<&SnapshotInfo>,
    scroll: &mut ScrollPosition,
) {
    draw_brief(host, current, last);

    let mut toggled = Vec::new();
    *scroll = host.begin_scroll(*scroll);
    for (type_name, group) in current.groups() {
        let expanded = draw_type_header(host, type_name, group, last);
        if expanded != group.is_expanded() {
            toggled.push((type_name.to_owned(), expanded));
        }
        if expanded {
            draw_objects(host, group.objects());
        }
    }
    host.end_scroll();

    for (type_name, expanded) in toggled {
        current.set_expanded(&type_name, expanded);
    }
}

fn draw_brief<H: RenderHost + ?Sized>(
    host: &mut H,
    current: &SnapshotInfo,
    last: Option<&SnapshotInfo>,
) {
    host.begin_horizontal(GroupStyle::Boxed);

    let types = format_count(
        current.type_count() as u64,
        last.map(|last| last.type_count() as u64),
    );
    host.label(&format!("Types: {types}"), Width::Fit);

    let objects = format_count(
        current.total_object_count(),
        last.map(SnapshotInfo::total_object_count),
    );
    host.label(&format!("Objects: {objects}"), Width::Fit);

    let bytes = format_bytes(
        current.total_bytes(),
        last.map(SnapshotInfo::total_bytes),
        |bytes| host.format_bytes(bytes),
    );
    host.label(&format!("Memory: {bytes}"), Width::Fit);

    host.end_horizontal();
}

fn draw_type_header<H: RenderHost + ?Sized>(
    host: &mut H,
    type_name: &str,
    group: &TypeGroup,
    last: Option<&SnapshotInfo>,
) -> bool {
    host.begin_horizontal(GroupStyle::Plain);
    let expanded = host.foldout(group.is_expanded(), type_name);

    // A type absent from the last capture gets no count delta, while its
    // byte delta is taken against zero.
    let count = format_count(
        group.objects().len() as u64,
        last.and_then(|last| last.object_count(type_name))
            .map(|count| count as u64),
    );
    host.label(&format!("Objects: {count}"), Width::Fit);

    let bytes = format_bytes(
        group.total_bytes(),
        last.map(|last| last.type_byte_total(type_name)),
        |bytes| host.format_bytes(bytes),
    );
    host.label(&format!("Size: {bytes}"), Width::Fit);

    host.end_horizontal();
    expanded
}

fn draw_objects<H: RenderHost + ?Sized>(host: &mut H, objects: &[RawNativeObject]) {
    host.begin_vertical(GroupStyle::Boxed);
    for object in objects {
        host.begin_horizontal(GroupStyle::Plain);
        let name = if object.name.is_empty() {
            NO_NAME
        } else {
            object.name.as_str()
        };
        host.label(&format!("    {name}"), Width::Expand);
        let size = host.format_bytes(object.size);
        host.label(&format!("Size: {size}"), Width::Fit);
        host.label(&format!("Instance ID: {}", object.instance_id), Width::Fit);
        host.end_horizontal();
    }
    host.end_vertical();
}
