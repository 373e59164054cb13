pub mod linepaint;
