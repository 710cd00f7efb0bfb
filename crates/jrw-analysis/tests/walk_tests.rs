use super::*;

fn halve(n: u32) -> Option<u32> {
    if n == 0 { None } else { Some(n / 2) }
}

#[test]
fn test_visitor_break_wins() {
    let walk = walk_outward(40u32, 100, halve, |n| {
        if n < 8 {
            ControlFlow::Break(n)
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(walk, Walk::Found(5));
}

#[test]
fn test_exhausted_after_last_step() {
    let mut seen = Vec::new();
    let walk: Walk<()> = walk_outward(4u32, 100, halve, |n| {
        seen.push(n);
        ControlFlow::Continue(())
    });
    assert_eq!(walk, Walk::Exhausted);
    assert_eq!(seen, vec![4, 2, 1, 0]);
}

#[test]
fn test_limit_stops_cycles() {
    let walk: Walk<()> = walk_outward(1u32, 16, Some, |_| ControlFlow::Continue(()));
    assert_eq!(walk, Walk::LimitReached);
    assert_eq!(walk.found(), None);
}
