#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    size: usize,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, size: usize) -> Self {
        Self { name, group, size }
    }

    pub fn small(name: &'static str, size: usize) -> Self {
        Self::new(name, TestGroup::Small, size)
    }

    pub fn normal(name: &'static str, size: usize) -> Self {
        Self::new(name, TestGroup::Normal, size)
    }

    pub fn large(name: &'static str, size: usize) -> Self {
        Self::new(name, TestGroup::Large, size)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    /// Payload length in bytes, or number of pairs for extension cases
    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

/// Header pairs taken from a browser request, cycled to fill larger cases
static HEADERS: &[(&str, &str)] = &[
    (":method", "GET"),
    (":scheme", "https"),
    (":authority", "127.0.0.1:8080"),
    (":path", "/index/?a=1&b=2&a=3"),
    ("cache-control", "max-age=0"),
    ("user-agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko)"),
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    ("accept-encoding", "gzip, deflate, br"),
    ("accept-language", "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("sec-fetch-mode", "navigate"),
];

pub fn headers(count: usize) -> impl Iterator<Item = (&'static str, &'static str)> {
    HEADERS.iter().copied().cycle().take(count)
}
