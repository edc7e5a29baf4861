/// 可视位置的数量，左右对称分布在中心两侧
pub const POSITION_COUNT: usize = 5;

/// One of the five visual slots, ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    FarLeft,
    Left,
    Center,
    Right,
    FarRight,
}

/// Rotation direction of a single step.
///
/// `Forward` is "next": every item moves one slot to the left and the
/// current index increases. `Backward` is "prev".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Position {
    pub const ALL: [Position; POSITION_COUNT] = [
        Position::FarLeft,
        Position::Left,
        Position::Center,
        Position::Right,
        Position::FarRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 超出范围的下标按模运算回绕
    #[inline]
    pub fn from_index(index: usize) -> Position {
        Self::ALL[index % POSITION_COUNT]
    }

    /// CSS class the host stylesheet binds the transform to.
    pub fn class_name(self) -> &'static str {
        match self {
            Position::FarLeft => "position-far-left",
            Position::Left => "position-left",
            Position::Center => "position-center",
            Position::Right => "position-right",
            Position::FarRight => "position-far-right",
        }
    }

    /// Slot this position moves to after one rotation step.
    pub fn shifted(self, direction: Direction) -> Position {
        let index = match direction {
            Direction::Forward => self.index() + POSITION_COUNT - 1,
            Direction::Backward => self.index() + 1,
        };
        Self::from_index(index)
    }

    /// Slot an item starts in when the item at `current_index` is the
    /// conceptual center.
    pub fn initial(item: usize, current_index: usize) -> Position {
        let index = (item + POSITION_COUNT - current_index % POSITION_COUNT) % POSITION_COUNT;
        Self::from_index(index)
    }
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Move `index` one step in this direction inside `[0, count)`.
    pub fn step(self, index: usize, count: usize) -> usize {
        match self {
            Direction::Forward => (index + 1) % count,
            Direction::Backward => (index + count - 1) % count,
        }
    }
}
