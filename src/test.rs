#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::agent::{Agent, RandomAgent};
    use crate::board::{streaks, Cell, GameState};
    use crate::eval::evaluation;
    use crate::search::{SearchAgent, SearchDepth};

    #[test]
    pub fn streak_partitioning() {
        use Cell::*;
        let line = [PlayerOne, PlayerOne, Empty, PlayerTwo, PlayerTwo, PlayerTwo, PlayerOne];
        assert_eq!(
            streaks(&line),
            vec![(PlayerOne, 2), (Empty, 1), (PlayerTwo, 3), (PlayerOne, 1)]
        );
        assert_eq!(streaks(&[]), vec![]);
        assert_eq!(streaks(&[Empty]), vec![(Empty, 1)]);
    }

    #[test]
    pub fn terminal_score() -> Result<()> {
        // both length-3 diagonals belong to player one: 9 + 9
        let board = GameState::from_rows(&[
            "XOX", //
            "OXO", //
            "XOX",
        ])?;
        assert!(board.is_full());
        assert_eq!(board.score()?, 18.0);
        Ok(())
    }

    #[test]
    pub fn score_requires_full_board() -> Result<()> {
        let board = GameState::from_rows(&[
            "...", //
            "X..", //
            "XO.",
        ])?;
        assert!(!board.is_full());
        assert!(board.score().is_err());
        Ok(())
    }

    #[test]
    pub fn successors_skip_full_columns() -> Result<()> {
        let board = GameState::from_rows(&[
            ".X.", //
            "XO.",
        ])?;
        let columns: Vec<usize> = board.successors().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![0, 2]);
        Ok(())
    }

    #[test]
    pub fn diagonal_enumeration() -> Result<()> {
        let board = GameState::from_rows(&[
            "XOX", //
            "OXO", //
            "XOX",
        ])?;
        let diags = board.get_all_diags();
        // width + height - 1 maximal diagonals in each direction
        assert_eq!(diags.len(), 10);
        let full_runs = diags
            .iter()
            .filter(|line| **line == vec![Cell::PlayerOne; 3])
            .count();
        assert_eq!(full_runs, 2);
        Ok(())
    }

    #[test]
    pub fn from_rows_rejects_bad_boards() {
        // ragged rows
        assert!(GameState::from_rows(&["..", "..."]).is_err());
        // unknown cell character
        assert!(GameState::from_rows(&["..", "Y."]).is_err());
        // tile floating above an empty cell
        assert!(GameState::from_rows(&["X.", ".."]).is_err());
    }

    #[test]
    pub fn next_player_alternates() -> Result<()> {
        let mut state = GameState::new(3, 3)?;
        assert_eq!(state.next_player(), 1);
        for expected in [-1, 1, -1, 1].iter() {
            state = state.successors().remove(0).1;
            assert_eq!(state.next_player(), *expected);
        }
        Ok(())
    }

    #[test]
    pub fn exact_minimax_trivial_boards() -> Result<()> {
        // no streak of three fits on these boards, every terminal scores 0
        let mut agent = SearchAgent::exact();
        let value = agent.minimax(&GameState::new(2, 2)?, SearchDepth::Unbounded)?;
        assert_eq!(value, 0.0);
        let value = agent.minimax(&GameState::new(3, 1)?, SearchDepth::Unbounded)?;
        assert_eq!(value, 0.0);
        Ok(())
    }

    #[test]
    pub fn terminal_score_overrides_depth_cutoff() -> Result<()> {
        let board = GameState::from_rows(&[
            "XOX", //
            "OXO", //
            "XOX",
        ])?;
        let mut exact = SearchAgent::exact();
        let mut plain = SearchAgent::heuristic(SearchDepth::Limited(0));
        let mut pruned = SearchAgent::alpha_beta(SearchDepth::Limited(0));
        assert_eq!(exact.minimax(&board, SearchDepth::Unbounded)?, 18.0);
        assert_eq!(plain.minimax(&board, SearchDepth::Limited(0))?, 18.0);
        assert_eq!(pruned.minimax(&board, SearchDepth::Limited(0))?, 18.0);
        Ok(())
    }

    #[test]
    pub fn depth_zero_returns_evaluation() -> Result<()> {
        let board = GameState::from_rows(&[
            "...", //
            "X..", //
            "XO.",
        ])?;
        let mut agent = SearchAgent::heuristic(SearchDepth::Limited(0));
        let value = agent.minimax(&board, SearchDepth::Limited(0))?;
        assert_eq!(value, evaluation(&board));
        // the cutoff must not have recursed into any successor
        assert_eq!(agent.node_count, 1);
        Ok(())
    }

    #[test]
    pub fn evaluation_is_player_symmetric() -> Result<()> {
        let board = GameState::from_rows(&[
            "...", //
            "X..", //
            "XO.",
        ])?;
        let swapped = GameState::from_rows(&[
            "...", //
            "O..", //
            "OX.",
        ])?;
        assert_eq!(evaluation(&board), 2.0);
        assert_eq!(evaluation(&board), -evaluation(&swapped));
        Ok(())
    }

    #[test]
    pub fn pruning_matches_plain_minimax() -> Result<()> {
        let positions = vec![
            GameState::new(3, 3)?,
            GameState::from_moves(3, 3, "1223")?,
            GameState::from_moves(4, 4, "12123")?,
        ];
        let depths = [
            SearchDepth::Limited(1),
            SearchDepth::Limited(2),
            SearchDepth::Limited(4),
            SearchDepth::Unbounded,
        ];
        for state in &positions {
            for &depth in depths.iter() {
                let mut plain = SearchAgent::heuristic(depth);
                let mut pruned = SearchAgent::alpha_beta(depth);
                assert_eq!(
                    plain.minimax(state, depth)?,
                    pruned.minimax(state, depth)?,
                    "value mismatch at depth {:?}",
                    depth
                );
                assert_eq!(plain.get_move(state)?, pruned.get_move(state)?);
            }
        }
        Ok(())
    }

    #[test]
    pub fn pruning_visits_fewer_nodes() -> Result<()> {
        let state = GameState::new(3, 3)?;
        let mut plain = SearchAgent::heuristic(SearchDepth::Unbounded);
        let mut pruned = SearchAgent::alpha_beta(SearchDepth::Unbounded);

        let plain_value = plain.minimax(&state, SearchDepth::Unbounded)?;
        let pruned_value = pruned.minimax(&state, SearchDepth::Unbounded)?;

        assert_eq!(plain_value, pruned_value);
        assert!(
            pruned.node_count < plain.node_count,
            "expected pruning to visit fewer nodes: {} vs {}",
            pruned.node_count,
            plain.node_count
        );
        Ok(())
    }

    #[test]
    pub fn chosen_move_is_a_successor() -> Result<()> {
        let state = GameState::from_moves(4, 4, "12123")?;
        let mut agent = SearchAgent::alpha_beta(SearchDepth::Limited(3));
        let (column, next_state) = agent.get_move(&state)?;
        assert!(state
            .successors()
            .iter()
            .any(|(c, s)| *c == column && *s == next_state));
        Ok(())
    }

    #[test]
    pub fn ties_keep_the_first_move() -> Result<()> {
        // mirror-symmetric positions where every move has equal value
        let mut agent = SearchAgent::exact();
        let (column, _) = agent.get_move(&GameState::new(3, 1)?)?;
        assert_eq!(column, 0);
        let (column, _) = agent.get_move(&GameState::new(2, 2)?)?;
        assert_eq!(column, 0);
        Ok(())
    }

    #[test]
    pub fn get_move_fails_on_a_full_board() -> Result<()> {
        let board = GameState::from_rows(&[
            "XOX", //
            "OXO", //
            "XOX",
        ])?;
        assert!(board.successors().is_empty());
        let mut agent = SearchAgent::exact();
        assert!(agent.get_move(&board).is_err());
        Ok(())
    }

    #[test]
    pub fn heuristic_agent_completes_a_streak() -> Result<()> {
        // column 4 turns the pair into a scoring run of three
        let state = GameState::from_rows(&["OXX..O"])?;
        assert_eq!(state.next_player(), 1);
        let mut agent = SearchAgent::heuristic(SearchDepth::Limited(0));
        let (column, _) = agent.get_move(&state)?;
        assert_eq!(column, 3);
        Ok(())
    }

    #[test]
    pub fn parallel_search_matches_sequential() -> Result<()> {
        let state = GameState::new(3, 3)?;

        let mut sequential = SearchAgent::exact();
        let mut parallel = SearchAgent::exact();
        assert_eq!(
            sequential.get_move(&state)?,
            parallel.get_move_parallel(&state)?
        );
        assert_eq!(sequential.node_count, parallel.node_count);

        let mut sequential = SearchAgent::alpha_beta(SearchDepth::Limited(4));
        let mut parallel = SearchAgent::alpha_beta(SearchDepth::Limited(4));
        assert_eq!(
            sequential.get_move(&state)?,
            parallel.get_move_parallel(&state)?
        );
        Ok(())
    }

    #[test]
    pub fn random_agent_plays_a_legal_move() -> Result<()> {
        let state = GameState::from_moves(3, 2, "122")?;
        let mut agent = RandomAgent::new();
        for _ in 0..20 {
            let (column, next_state) = agent.get_move(&state)?;
            assert!(state
                .successors()
                .iter()
                .any(|(c, s)| *c == column && *s == next_state));
        }
        Ok(())
    }
}
