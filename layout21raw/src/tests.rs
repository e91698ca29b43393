//!
//! # layout21::raw unit tests
//!

use super::*;

/// Create a [Library] with a single-Rectangle cell `leaf`
fn leaf_lib() -> Library {
    let mut lib = Library::new("test");
    let mut leaf = Cell::new("leaf");
    leaf.push(Element::new(
        1,
        vec![
            Point::new(0, 0),
            Point::new(0, 50),
            Point::new(100, 50),
            Point::new(100, 0),
            Point::new(0, 0),
        ],
    ));
    lib.add_cell(leaf);
    lib
}

#[test]
fn flatten_single_shape() -> LayoutResult<()> {
    let lib = leaf_lib();
    let top = lib.top(None)?;
    let shapes = lib.flatten(top)?;
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].layer, 1);
    assert_eq!(shapes[0].points, lib.cells[top].elems().next().unwrap().points);
    Ok(())
}

#[test]
fn identity_instance_reproduces_shape() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    top.push(Instance::new("leaf", Placement::new((0, 0), 0., false)));
    lib.add_cell(top);

    let shapes = lib.flatten(lib.top(Some("top"))?)?;
    let leaf = lib.cell("leaf").unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].points, leaf.elems().next().unwrap().points);
    Ok(())
}

#[test]
fn placed_instance() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    top.push(Instance::new("leaf", Placement::new((200, 0), 90., false)));
    lib.add_cell(top);

    let shapes = lib.flatten(lib.top(None)?)?;
    assert_eq!(
        shapes[0].points,
        vec![
            Point::new(200, 0),
            Point::new(150, 0),
            Point::new(150, 100),
            Point::new(200, 100),
            Point::new(200, 0),
        ]
    );
    Ok(())
}

#[test]
fn nested_placements_compose() -> LayoutResult<()> {
    // All 64 combinations of two levels of right-angle rotation and mirroring
    let probe = Point::new(7, 3);
    let (o1, o2) = (Point::new(1000, -20), Point::new(30, 40));
    for r1 in Rotation::ALL.iter() {
        for m1 in [false, true] {
            for r2 in Rotation::ALL.iter() {
                for m2 in [false, true] {
                    let mut lib = Library::new("compose");
                    let mut leaf = Cell::new("leaf");
                    leaf.push(Element::new(5, vec![probe]));
                    lib.add_cell(leaf);
                    let mut mid = Cell::new("mid");
                    mid.push(Instance::new("leaf", Placement::new(o2, r2.degrees(), m2)));
                    lib.add_cell(mid);
                    let mut top = Cell::new("top");
                    top.push(Instance::new("mid", Placement::new(o1, r1.degrees(), m1)));
                    lib.add_cell(top);

                    let shapes = lib.flatten(lib.top(None)?)?;
                    let angle = (r1.degrees() + r2.degrees()) % 360.;
                    let offset = apply(&o2, r1.degrees(), m1, &o1)?;
                    let expected = apply(&probe, angle, m1 ^ m2, &offset)?;
                    assert_eq!(shapes[0].points, vec![expected], "{:?} {} {:?} {}", r1, m1, r2, m2);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn double_mirror_cancels() -> LayoutResult<()> {
    let a = Placement::new((0, 0), 0., true);
    let c = Placement::cascade(&a, &a)?;
    assert!(!c.mirror);
    assert_eq!(Point::new(4, 9).transform(&c)?, Point::new(4, 9));
    Ok(())
}

#[test]
fn children_flatten_in_order() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    top.push(Element::new(3, vec![Point::new(1, 1)]));
    top.push(Instance::new("leaf", Placement::identity()));
    top.push(Element::new(2, vec![Point::new(2, 2)]));
    lib.add_cell(top);

    let shapes = lib.flatten(lib.top(None)?)?;
    let layers: Vec<LayerNum> = shapes.iter().map(|s| s.layer).collect();
    assert_eq!(layers, vec![3, 1, 2]);
    Ok(())
}

#[test]
fn shared_cells_are_expanded_per_instance() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    for x in [0, 1000, 2000] {
        top.push(Instance::new("leaf", Placement::new((x, 0), 0., false)));
    }
    lib.add_cell(top);
    let mut count = Counter(0);
    let n = lib.flatten_into(lib.top(None)?, &mut count)?;
    assert_eq!(n, 3);
    assert_eq!(count.0, 3);
    // One definition, however many instances
    assert_eq!(lib.cells.len(), 2);
    Ok(())
}
/// [FlatSink] which only counts
struct Counter(usize);
impl FlatSink for Counter {
    fn shape(&mut self, _shape: FlatShape) {
        self.0 += 1;
    }
}

#[test]
fn unresolved_reference() -> LayoutResult<()> {
    let mut lib = Library::new("test");
    let mut top = Cell::new("top");
    top.push(Instance::new("missing", Placement::identity()));
    lib.add_cell(top);
    match lib.flatten(lib.top(None)?) {
        Err(LayoutError::UnresolvedCellReference { cell, parent }) => {
            assert_eq!(cell, "missing");
            assert_eq!(parent, Some("top".to_string()));
        }
        other => panic!("expected UnresolvedCellReference, got {:?}", other),
    }
    Ok(())
}

#[test]
fn unknown_top_cell() {
    let lib = leaf_lib();
    match lib.top(Some("nope")) {
        Err(LayoutError::UnresolvedCellReference { cell, parent: None }) => assert_eq!(cell, "nope"),
        other => panic!("expected UnresolvedCellReference, got {:?}", other),
    }
    match Library::new("empty").top(None) {
        Err(LayoutError::EmptyLibrary(name)) => assert_eq!(name, "empty"),
        other => panic!("expected EmptyLibrary, got {:?}", other),
    }
}

#[test]
fn cycles_are_rejected() -> LayoutResult<()> {
    let mut lib = Library::new("cyclic");
    let mut a = Cell::new("a");
    a.push(Instance::new("b", Placement::identity()));
    let mut b = Cell::new("b");
    b.push(Instance::new("a", Placement::identity()));
    lib.add_cell(a);
    lib.add_cell(b);
    match lib.flatten(lib.top(Some("a"))?) {
        Err(LayoutError::CyclicReference { cell }) => assert_eq!(cell, "a"),
        other => panic!("expected CyclicReference, got {:?}", other),
    }
    // Self-instantiation too
    let mut lib = Library::new("selfish");
    let mut s = Cell::new("s");
    s.push(Instance::new("s", Placement::identity()));
    lib.add_cell(s);
    assert!(matches!(
        lib.flatten(lib.top(None)?),
        Err(LayoutError::CyclicReference { .. })
    ));
    Ok(())
}

#[test]
fn non_right_instance_angle() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    top.push(Instance::new("leaf", Placement::new((0, 0), 45., false)));
    lib.add_cell(top);
    assert!(matches!(
        lib.flatten(lib.top(None)?),
        Err(LayoutError::UnsupportedAngle { .. })
    ));
    Ok(())
}

#[test]
fn placement_overflow_fails_expansion() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let mut top = Cell::new("top");
    top.push(Instance::new("leaf", Placement::new((Int::MAX, 0), 0., false)));
    lib.add_cell(top);
    assert!(matches!(
        lib.flatten(lib.top(None)?),
        Err(LayoutError::CoordinateOverflow { .. })
    ));
    Ok(())
}

#[test]
fn redefinition_replaces() -> LayoutResult<()> {
    let mut lib = leaf_lib();
    let first = lib.key("leaf").unwrap();
    lib.add_cell(Cell::new("other"));
    let mut leaf2 = Cell::new("leaf");
    leaf2.push(Element::new(9, vec![Point::new(0, 0)]));
    let second = lib.add_cell(leaf2);
    assert_eq!(first, second);
    assert_eq!(lib.cells.len(), 2);
    assert_eq!(lib.cell("leaf").unwrap().elems().next().unwrap().layer, 9);
    // The redefinition is now the most recent
    assert_eq!(lib.top(None)?, second);
    Ok(())
}

#[test]
fn import_dump() -> LayoutResult<()> {
    let src = r#"
        Cell Name: top
        Cell Instance: leaf
          (200, 0) 90 0
        End Cell Definition
        Cell Name: leaf
        Rectangle: 1 0 0 100 50
        Polygon: 2 3
          0 0 10 0 10 10
        End Cell Definition
    "#;
    let dump = dump21::parse_str(src)?;
    let lib = Library::from_dump(&dump)?;
    assert_eq!(lib.keys().map(|k| lib.cells[k].name.clone()).collect::<Vec<_>>(), vec!["top", "leaf"]);

    let leaf = lib.cell("leaf").unwrap();
    let elems: Vec<&Element> = leaf.elems().collect();
    assert_eq!(elems.len(), 2);
    assert_eq!(elems[0].points.len(), 5);
    assert_eq!(elems[1].points, vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)]);

    // Forward reference from `top` to `leaf` resolves at expansion time
    let shapes = lib.flatten(lib.top(Some("top"))?)?;
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[1].layer, 2);
    assert_eq!(shapes[1].points[1], Point::new(200, 10));
    Ok(())
}

#[test]
fn dump_parse_errors_forward() {
    let dump = dump21::parse_str("Cell Name: c\nRectangle: 1 0 0\n");
    let err = LayoutError::from(dump.unwrap_err());
    assert!(matches!(err, LayoutError::Dump(_)));
}

#[test]
fn empty_polygons_fail_import() {
    let mut cell = dump21::DumpCell::new("bad");
    cell.elems.push(
        dump21::DumpPolygon {
            layer: 1,
            points: Vec::new(),
        }
        .into(),
    );
    let dump = dump21::DumpLibrary { cells: vec![cell] };
    match Library::from_dump(&dump) {
        Err(LayoutError::Import { cell, .. }) => assert_eq!(cell, "bad"),
        other => panic!("expected Import error, got {:?}", other),
    }
}
