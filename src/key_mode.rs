use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::PresortError;

/// Which record fields compose the primary key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// `id` alone
    #[default]
    Id,
    /// `id`, then `field_a`
    IdA,
    /// `id`, then `field_a`, then `field_b`
    IdAB,
    /// `id`, then `field_b`, then `field_a`. Supported by the sort based dedup only.
    IdBA,
}

impl KeyMode {
    /// Whether the streaming merge and the plain sort accept this mode.
    pub fn streamable(&self) -> bool {
        !matches!(self, KeyMode::IdBA)
    }

    /// Derive the key mode from a `CREATE TABLE` statement.
    ///
    /// A primary key on `id` alone maps to [KeyMode::Id], on (`id`, `a`) to [KeyMode::IdA], an
    /// unnamed key on (`id`, `b`) to [KeyMode::IdBA] and everything else to [KeyMode::IdAB].
    /// Named secondary indexes do not take part. Whitespace is ignored.
    ///
    /// # Examples
    /// ```
    /// use keyed_presort::key_mode::KeyMode;
    /// let ddl = "CREATE TABLE `t` (`id` int, `a` varchar(32), PRIMARY KEY (`id`,`a`))";
    /// assert_eq!(KeyMode::detect(ddl), KeyMode::IdA);
    /// ```
    pub fn detect(ddl: &str) -> KeyMode {
        let compact: String = ddl.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.contains("PRIMARYKEY(`id`)") {
            KeyMode::Id
        } else if compact.contains("PRIMARYKEY(`id`,`a`)") {
            KeyMode::IdA
        } else if compact.contains("KEY(`id`,`b`)") {
            KeyMode::IdBA
        } else {
            KeyMode::IdAB
        }
    }
}

impl FromStr for KeyMode {
    type Err = PresortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(KeyMode::Id),
            "id_a" => Ok(KeyMode::IdA),
            "id_a_b" => Ok(KeyMode::IdAB),
            "id_b_a" => Ok(KeyMode::IdBA),
            other => Err(PresortError::UnknownKeyMode(other.to_string())),
        }
    }
}

impl Display for KeyMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyMode::Id => "id",
            KeyMode::IdA => "id_a",
            KeyMode::IdAB => "id_a_b",
            KeyMode::IdBA => "id_b_a",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::errors::PresortError;
    use crate::key_mode::KeyMode;

    #[test]
    fn test_parse_names() -> Result<(), anyhow::Error> {
        for name in ["id", "id_a", "id_a_b", "id_b_a"] {
            assert_eq!(KeyMode::from_str(name)?.to_string(), name);
        }
        Ok(())
    }

    #[test]
    fn test_parse_unknown() {
        let result = KeyMode::from_str("a_id");
        assert!(matches!(result, Err(PresortError::UnknownKeyMode(ref name)) if name == "a_id"));
    }

    #[test]
    fn test_streamable() {
        assert!(KeyMode::Id.streamable());
        assert!(KeyMode::IdA.streamable());
        assert!(KeyMode::IdAB.streamable());
        assert!(!KeyMode::IdBA.streamable());
    }

    #[test]
    fn test_detect() {
        let id = "CREATE TABLE `1` (\n  `id` bigint NOT NULL,\n  PRIMARY KEY (`id`)\n)";
        let id_a = "CREATE TABLE `2` (\n  `id` bigint,\n  `a` varchar(32),\n  PRIMARY KEY (`id`, `a`)\n)";
        let id_b_a = "CREATE TABLE `3` (\n  `id` bigint,\n  KEY (`id`, `b`)\n)";
        let id_a_b = "CREATE TABLE `4` (\n  `id` bigint,\n  PRIMARY KEY (`id`,`a`,`b`)\n)";
        assert_eq!(KeyMode::detect(id), KeyMode::Id);
        assert_eq!(KeyMode::detect(id_a), KeyMode::IdA);
        assert_eq!(KeyMode::detect(id_b_a), KeyMode::IdBA);
        assert_eq!(KeyMode::detect(id_a_b), KeyMode::IdAB);
        assert_eq!(KeyMode::detect("CREATE TABLE `5` (`id` bigint)"), KeyMode::IdAB);
        assert_eq!(KeyMode::detect("CREATE TABLE `6` (`id` bigint, PRIMARY KEY (`id`,`b`))"), KeyMode::IdBA);
    }

    #[test]
    fn test_detect_ignores_named_index() {
        let ddl = "CREATE TABLE `7` (\n  `id` bigint,\n  PRIMARY KEY (`id`,`a`,`b`),\n  KEY `idx_b` (`id`,`b`)\n)";
        assert_eq!(KeyMode::detect(ddl), KeyMode::IdAB);
        let ddl = "CREATE TABLE `8` (\n  `id` bigint,\n  UNIQUE KEY `uk` (`id`,`b`)\n)";
        assert_eq!(KeyMode::detect(ddl), KeyMode::IdAB);
    }
}
