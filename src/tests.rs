#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::graph::{GraphError, RouteGraph, TreeCheck};
    use crate::grid::{Grid, Location, ParseError as GridParseError, Plot};
    use crate::modules::{self, ModuleKind, ParseError as ModuleParseError};
    use crate::workflow::{self, ParseError as WorkflowParseError};

    fn graph_of(routes: &[(&str, &[&str])], sinks: &[&str]) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for sink in sinks {
            graph.insert_sink(sink);
        }
        for (src, destinations) in routes {
            graph.insert_route(src, destinations.iter().copied());
        }
        graph
    }

    #[test]
    fn branching_graph_is_tree() {
        let graph = graph_of(&[("in", &["a", "R"]), ("a", &["A", "R"])], &["A", "R"]);
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn two_node_cycle_is_reported_with_its_path() {
        let graph = graph_of(&[("in", &["a"]), ("a", &["in"])], &["A", "R"]);
        assert_eq!(
            graph.check_tree("in"),
            Ok(TreeCheck::Cycle {
                path: vec!["in".to_owned(), "a".to_owned(), "in".to_owned()],
            })
        );
    }

    #[test]
    fn sinks_are_leaves_even_with_successors() {
        // "A" routes back to "in", but as a sink it must never be expanded
        let graph = graph_of(&[("in", &["A"]), ("A", &["in"])], &["A"]);
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn sinks_need_not_be_declared() {
        let graph = graph_of(&[("in", &["a", "R"]), ("a", &["A"])], &["A", "R"]);
        assert!(graph.is_sink("A"));
        assert_eq!(graph.successors("A"), None);
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let graph = graph_of(
            &[("in", &["left", "right"]), ("left", &["out"]), ("right", &["out"]), ("out", &["A"])],
            &["A", "R"],
        );
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn declared_node_without_successors_ends_its_branch() {
        let mut graph = graph_of(&[("in", &["stub"])], &[]);
        graph.insert_route("stub", Vec::<&str>::new());
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn dangling_destination_is_an_error() {
        let graph = graph_of(&[("in", &["x"])], &["A", "R"]);
        assert_eq!(graph.check_tree("in"), Err(GraphError::MissingNode("x".to_owned())));
    }

    #[test]
    fn unknown_start_is_an_error() {
        let graph = RouteGraph::new();
        assert_eq!(graph.check_tree("in"), Err(GraphError::MissingNode("in".to_owned())));
    }

    #[test]
    fn starting_on_a_sink_is_trivially_a_tree() {
        let graph = graph_of(&[], &["A"]);
        assert_eq!(graph.check_tree("A"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn duplicate_destinations_are_kept_in_order() {
        // appears verbatim in the real day 19 input
        let graph = workflow::parse("lnx{m>1548:A,A}\n").unwrap();
        assert_eq!(graph.successors("lnx"), Some(vec!["A", "A"]));
        assert_eq!(graph.check_tree("lnx"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn redeclared_source_keeps_only_the_last_route() {
        let mut graph = graph_of(&[("a", &["b", "R"])], &["A", "R"]);
        graph.insert_route("a", ["c", "R"]);
        graph.insert_route("c", ["A"]);

        assert_eq!(graph.successors("a"), Some(vec!["c", "R"]));
        // the stale route to the dangling `b` is gone, so this is a tree
        assert_eq!(graph.check_tree("a"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn workflow_redeclaration_keeps_the_last_line() {
        let input = "in{x<1:a,R}\na{x<1:b,R}\na{y<1:c,R}\nc{x<1:A,R}\n";
        let graph = workflow::parse(input).unwrap();
        assert_eq!(graph.successors("a"), Some(vec!["c", "R"]));
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
    }

    #[test]
    fn workflow_routes_keep_input_order() {
        let graph = workflow::parse("px{a<2006:qkq,m>2090:A,rfg}\nqkq{x<1416:A,crn}\n").unwrap();
        assert_eq!(graph.successors("px"), Some(vec!["qkq", "A", "rfg"]));
        assert!(graph.is_sink("A"));
        assert!(graph.is_sink("R"));
    }

    #[test]
    fn workflow_section_ends_at_the_blank_line() {
        let input = "in{x<5:a,R}\na{s>10:A,R}\n\n{x=787,m=2655,a=1222,s=2876}\n";
        let graph = workflow::parse(input).unwrap();
        assert_eq!(graph.check_tree("in"), Ok(TreeCheck::Tree));
        assert_eq!(graph.successors("{x=787"), None);
    }

    #[test]
    fn workflow_example_is_a_tree() {
        // the day 19 example input, workflow section only
        let input = "px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}
";
        let graph = workflow::parse(input).unwrap();
        assert_eq!(graph.check_tree(workflow::ENTRY), Ok(TreeCheck::Tree));
    }

    #[test]
    fn workflow_line_without_brace_is_rejected() {
        assert_eq!(workflow::parse("px a<2006").unwrap_err(), WorkflowParseError::MissingOpenBrace(1));
        assert_eq!(
            workflow::parse("in{a,R}\npx{a<2006:qkq").unwrap_err(),
            WorkflowParseError::MissingCloseBrace(2)
        );
        assert_eq!(workflow::parse("{a,R}").unwrap_err(), WorkflowParseError::EmptyName(1));
        assert_eq!(workflow::parse("px{}").unwrap_err(), WorkflowParseError::EmptyBody(1));
    }

    #[test]
    fn module_example_has_a_cycle() {
        let input = "broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a\n";
        let config = modules::parse(input).unwrap();

        assert_eq!(config.kind("broadcaster"), Some(ModuleKind::Broadcaster));
        assert_eq!(config.kind("a"), Some(ModuleKind::FlipFlop));
        assert_eq!(config.kind("inv"), Some(ModuleKind::Conjunction));
        assert_eq!(config.kind("rx"), None);

        assert_eq!(
            config.graph().check_tree(modules::ENTRY),
            Ok(TreeCheck::Cycle {
                path: vec!["a".to_owned(), "b".to_owned(), "c".to_owned(), "inv".to_owned(), "a".to_owned()],
            })
        );
    }

    #[test]
    fn undeclared_destinations_become_sinks() {
        let input = "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output\n";
        let config = modules::parse(input).unwrap();

        assert!(config.graph().is_sink("output"));
        assert!(!config.graph().is_sink("con"));
        assert_eq!(config.into_graph().check_tree(modules::ENTRY), Ok(TreeCheck::Tree));
    }

    #[test]
    fn module_lines_must_be_well_formed() {
        assert_eq!(modules::parse("broadcaster a, b").unwrap_err(), ModuleParseError::MissingArrow(1));
        assert_eq!(modules::parse("*a -> b").unwrap_err(), ModuleParseError::BadPrefix(1, "*a".to_owned()));
        assert_eq!(modules::parse("% -> b").unwrap_err(), ModuleParseError::EmptyName(1));
        assert_eq!(modules::parse("%a -> b,,c").unwrap_err(), ModuleParseError::EmptyDestination(1));
    }

    #[test]
    fn grid_parse_finds_the_start() {
        let grid = Grid::parse("...\n.S.\n..#\n").unwrap();
        assert_eq!(grid.dims(), (3, 3));
        assert_eq!(grid.start(), Location(1, 1));
        assert_eq!(grid.plot(Location(2, 2)), Some(Plot::Rock));
        assert_eq!(grid.plot(Location(0, 0)), Some(Plot::Open));
        assert_eq!(grid.plot(Location(3, 0)), None);
    }

    #[test]
    fn grid_inputs_must_be_well_formed() {
        assert_eq!(Grid::parse("").unwrap_err(), GridParseError::Empty);
        assert_eq!(Grid::parse("..\n..").unwrap_err(), GridParseError::NoStart);
        assert_eq!(Grid::parse("S.\n..S").unwrap_err(), GridParseError::DuplicateStart);
        assert_eq!(Grid::parse("S..\n..").unwrap_err(), GridParseError::Ragged(2, 2, 3));
        assert_eq!(
            Grid::parse("S?").unwrap_err(),
            GridParseError::UnknownGlyph { line: 1, glyph: '?' }
        );
    }

    #[test]
    fn walk_expands_one_orthogonal_ring_per_step() {
        let grid = Grid::parse("...\n.S.\n...\n").unwrap();

        let one = grid.reachable_walk(1);
        assert_eq!(
            one,
            HashSet::from([Location(1, 0), Location(0, 1), Location(2, 1), Location(1, 2)])
        );

        // stepping back onto the start is allowed, so the corners and the start are reached
        let two = grid.reachable_walk(2);
        assert_eq!(
            two,
            HashSet::from([
                Location(0, 0),
                Location(2, 0),
                Location(1, 1),
                Location(0, 2),
                Location(2, 2),
            ])
        );
    }

    #[test]
    fn zero_steps_reaches_only_the_start() {
        let grid = Grid::parse("S.\n..\n").unwrap();
        assert_eq!(grid.reachable_walk(0), HashSet::from([Location(0, 0)]));
        assert_eq!(grid.reachable_spectral(0), HashSet::from([Location(0, 0)]));
    }

    #[test]
    fn spectral_matches_walk_around_a_rock() {
        let grid = Grid::parse("S.#\n...\n#..\n").unwrap();
        for steps in 0..=5 {
            assert_eq!(grid.reachable_spectral(steps), grid.reachable_walk(steps), "{steps} steps");
        }
    }

    #[test]
    fn spectral_solves_the_garden_example() {
        // the day 21 example input; 16 plots are reachable in exactly 6 steps
        let input = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";
        let grid = Grid::parse(input).unwrap();

        let walked = grid.reachable_walk(6);
        assert_eq!(walked.len(), 16);
        assert_eq!(grid.reachable_spectral(6), walked);
    }

    #[test]
    fn render_marks_occupied_plots() {
        let grid = Grid::parse("S.\n.#\n").unwrap();
        let occupied = HashSet::from([Location(1, 0)]);
        assert_eq!(grid.render(&occupied), ".O\n.#\n");
    }
}
